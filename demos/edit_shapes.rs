//! Drive an annotation viewer with a scripted pointer session and print the
//! resulting shapes in their text form.

use det_review::config::ViewerConfig;
use det_review::geometry::{
    format_points, parse_points, AnnotationViewer, PointerButton, PointerEvent, ShapeMode,
};
use glam::DVec2;

fn press(viewer: &mut AnnotationViewer, x: f64, y: f64, button: PointerButton, modifier: bool) {
    viewer.handle_event(PointerEvent::Press {
        position: DVec2::new(x, y),
        button,
        modifier,
    });
}

fn drag(viewer: &mut AnnotationViewer, from: DVec2, to: DVec2) {
    viewer.handle_event(PointerEvent::Press {
        position: from,
        button: PointerButton::Primary,
        modifier: false,
    });
    viewer.handle_event(PointerEvent::Move { position: to });
    viewer.handle_event(PointerEvent::Release {
        position: to,
        button: PointerButton::Primary,
    });
}

fn main() {
    env_logger::init();

    // A 1600x1200 image in an 800x600 viewport is shown at half scale
    let mut viewer = AnnotationViewer::new(DVec2::new(800.0, 600.0), ViewerConfig::default());
    viewer.load_image(DVec2::new(1600.0, 1200.0));
    println!("=== Shape Editing Session ===\n");
    println!("Initial scale: {:.3}", viewer.transform().scale());

    // 1. Polygon
    viewer.set_mode(ShapeMode::Polygon);
    for (x, y) in [(100.0, 100.0), (300.0, 100.0), (300.0, 250.0), (100.0, 250.0)] {
        press(&mut viewer, x, y, PointerButton::Primary, true);
    }
    println!("Polygon:            {}", format_points(viewer.points()));

    drag(&mut viewer, DVec2::new(200.0, 180.0), DVec2::new(250.0, 200.0));
    println!("After shape drag:   {}", format_points(viewer.points()));

    press(&mut viewer, 0.0, 0.0, PointerButton::Secondary, false);
    println!("After undo:         {}", format_points(viewer.points()));
    println!();

    // 2. Rectangle from two corner clicks, then a corner drag
    viewer.set_mode(ShapeMode::Rectangle);
    press(&mut viewer, 400.0, 300.0, PointerButton::Primary, true);
    press(&mut viewer, 600.0, 450.0, PointerButton::Primary, true);
    println!("Rectangle:          {}", format_points(viewer.points()));

    drag(&mut viewer, DVec2::new(600.0, 450.0), DVec2::new(700.0, 500.0));
    println!("After corner drag:  {}", format_points(viewer.points()));
    println!();

    // 3. Zoom in around the cursor and pan
    viewer.handle_event(PointerEvent::Wheel {
        position: DVec2::new(500.0, 375.0),
        delta: 120.0,
    });
    drag(&mut viewer, DVec2::new(50.0, 50.0), DVec2::new(80.0, 60.0));
    let transform = viewer.transform();
    println!("Zoomed scale:       {:.3}", transform.scale());
    println!("Pan offset:         {}", transform.pan_offset());
    if let Some(image) = transform.to_image(DVec2::new(400.0, 300.0)) {
        println!("Viewport centre is image pixel ({:.1}, {:.1})", image.x, image.y);
    }
    println!();

    // 4. Load shape text typed by the user
    let text = "[(10, 20), (30, 40)]";
    viewer.set_points(parse_points(text));
    println!("From text {text:?}: {}", format_points(viewer.points()));
}
