//! Standalone demo: opens a window with a ColorBox and a palette.

use floem::prelude::*;
use floem::window::WindowConfig;
use floem_colorbox::{color_box, ColorBoxConfig, Palette};

fn main() {
    let last = RwSignal::new(String::from("-"));

    let palette = Palette::new()
        .with("red", "#ff0000")
        .with("blue", "#0000ff")
        .with("yellow", "yellow")
        .with("darkBlue", "darkBlue");
    let config = ColorBoxConfig::uncontrolled("#830A0A7D").with_palette(palette);

    floem::Application::new()
        .window(
            move |_| {
                let (_handle, picker) = color_box(config.clone(), move |color| {
                    last.set(format!("{} ({})", color, color.name().unwrap_or("unnamed")));
                });
                v_stack((picker, label(move || last.get()).style(|s| s.padding(8.0))))
                    .on_event_stop(floem::event::EventListener::WindowClosed, |_| {
                        floem::quit_app()
                    })
            },
            Some(
                WindowConfig::default()
                    .size((260.0, 420.0))
                    .title("floem-colorbox"),
            ),
        )
        .run();
}
