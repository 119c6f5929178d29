use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::Application;

use crate::config::Settings;
use crate::models::ProjectCatalog;
use crate::ui::MainWindow;

const APP_ID: &str = "com.thirdspace.Portfolio";

pub struct ThirdspaceApp {
    app: Application,
}

impl ThirdspaceApp {
    pub fn new(settings: Settings, catalog: ProjectCatalog) -> Self {
        let app = Application::builder().application_id(APP_ID).build();

        let catalog = Rc::new(catalog);
        // The activate handler owns the window for the application's lifetime.
        let main_window: RefCell<Option<Rc<MainWindow>>> = RefCell::new(None);
        app.connect_activate(move |app| {
            if let Some(window) = main_window.borrow().as_ref() {
                window.present();
                return;
            }
            let window = MainWindow::new(app, settings.clone(), catalog.clone());
            window.present();
            *main_window.borrow_mut() = Some(window);
        });

        Self { app }
    }

    pub fn run(&self) -> i32 {
        self.app.run().into()
    }
}
