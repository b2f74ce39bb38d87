//! Import status widget entry point
//!
//! Mounts the widget into the `#import-status` element of the hosting page.

fn main() {
    dioxus::LaunchBuilder::web()
        .with_cfg(dioxus::web::Config::new().rootname(importer_web::MOUNT_ELEMENT_ID))
        .launch(importer_web::App);
}
