use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{glib, Align, Box as GtkBox, Button, Entry, Label, Orientation, TextView, WrapMode};

use crate::contact::{ContactField, ContactForm, ContactMessage, MailTransport, OutboxTransport};
use crate::error::TransportError;
use crate::sections::{CONTACT_HEADLINE, CONTACT_KICKER};

const SEND_LABEL: &str = "Send";
const SENDING_LABEL: &str = "Sending...";

/// Contact section: three fields, a send button and a notice line.
pub struct ContactPanel {
    root: GtkBox,
    name: Entry,
    email: Entry,
    message: TextView,
    send: Button,
    notice: Label,
    form: RefCell<ContactForm>,
    outbox: PathBuf,
}

impl ContactPanel {
    pub fn new(outbox: PathBuf) -> Rc<Self> {
        let root = GtkBox::new(Orientation::Vertical, 12);
        root.add_css_class("contact");
        root.set_margin_top(40);
        root.set_margin_bottom(40);
        root.set_margin_start(40);
        root.set_margin_end(40);

        let kicker = Label::new(Some(CONTACT_KICKER));
        kicker.set_halign(Align::Start);
        kicker.add_css_class("section-kicker");
        root.append(&kicker);

        let title = Label::new(Some(CONTACT_HEADLINE));
        title.set_halign(Align::Start);
        title.add_css_class("section-title");
        root.append(&title);

        let name = Entry::builder().placeholder_text("Your name").build();
        let email = Entry::builder().placeholder_text("Your email").build();
        let message = TextView::new();
        message.set_wrap_mode(WrapMode::WordChar);
        message.set_size_request(-1, 120);
        root.append(&name);
        root.append(&email);
        root.append(&message);

        let send = Button::with_label(SEND_LABEL);
        send.set_halign(Align::Start);
        send.add_css_class("card-button");
        root.append(&send);

        let notice = Label::new(None);
        notice.set_halign(Align::Start);
        notice.set_wrap(true);
        notice.add_css_class("contact-notice");
        root.append(&notice);

        let panel = Rc::new(Self {
            root,
            name,
            email,
            message,
            send,
            notice,
            form: RefCell::new(ContactForm::new()),
            outbox,
        });
        panel.setup_submit();
        panel
    }

    pub fn widget(&self) -> &GtkBox {
        &self.root
    }

    fn setup_submit(self: &Rc<Self>) {
        let (sender, receiver) = async_channel::unbounded::<Result<(), TransportError>>();

        let panel_weak = Rc::downgrade(self);
        glib::spawn_future_local(async move {
            while let Ok(outcome) = receiver.recv().await {
                let Some(panel) = panel_weak.upgrade() else {
                    break;
                };
                panel.finish(outcome);
            }
        });

        let panel_weak = Rc::downgrade(self);
        self.send.connect_clicked(move |_| {
            if let Some(panel) = panel_weak.upgrade() {
                panel.submit(sender.clone());
            }
        });
    }

    fn sync_form(&self) {
        let buffer = self.message.buffer();
        let message = buffer.text(&buffer.start_iter(), &buffer.end_iter(), false);
        let mut form = self.form.borrow_mut();
        form.set(ContactField::Name, self.name.text());
        form.set(ContactField::Email, self.email.text());
        form.set(ContactField::Message, message);
    }

    fn submit(&self, sender: async_channel::Sender<Result<(), TransportError>>) {
        self.sync_form();
        let message = match self.form.borrow_mut().begin_submit() {
            Ok(message) => message,
            Err(e) => {
                self.notice.set_text(&e.to_string());
                return;
            }
        };

        self.send.set_sensitive(false);
        self.send.set_label(SENDING_LABEL);
        self.notice.set_text("");

        let outbox = self.outbox.clone();
        std::thread::spawn(move || {
            let outcome = deliver_blocking(outbox, &message);
            let _ = sender.send_blocking(outcome);
        });
    }

    fn finish(&self, outcome: Result<(), TransportError>) {
        let notice = self.form.borrow_mut().finish_submit(&outcome);
        if outcome.is_ok() {
            self.name.set_text("");
            self.email.set_text("");
            self.message.buffer().set_text("");
        }
        self.send.set_sensitive(!self.form.borrow().is_submitting());
        self.send.set_label(SEND_LABEL);
        self.notice.set_text(notice.text());
    }
}

fn deliver_blocking(outbox: PathBuf, message: &ContactMessage) -> Result<(), TransportError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let transport = OutboxTransport::new(outbox);
    runtime.block_on(transport.deliver(message))
}
