use gtk4 as gtk;
use gtk4::prelude::*;

use ohlc_view::api::{ChartViewConfig, Dataset};
use ohlc_view::core::{Bar, Viewport};
use ohlc_view::platform_gtk::GtkChartContainer;

const CHART_WIDTH: u32 = 960;
const CHART_HEIGHT: u32 = 260;
const BAR_INTERVAL_SECONDS: i64 = 3_600;

fn main() {
    let _ = ohlc_view::telemetry::init_default_tracing();

    let app = gtk::Application::builder()
        .application_id("rs.ohlc_view.demos.gtk_ohlc_charts")
        .build();
    app.connect_activate(build_ui);
    app.run();
}

fn build_ui(app: &gtk::Application) {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 8);
    root.set_margin_top(10);
    root.set_margin_bottom(10);
    root.set_margin_start(10);
    root.set_margin_end(10);
    root.append(&gtk::Label::new(Some(
        "wheel=zoom around pointer | drag=pan",
    )));

    let mut container =
        GtkChartContainer::new(root.clone(), Viewport::new(CHART_WIDTH, CHART_HEIGHT));
    // Controllers and the draw function hold their own view handles, so the
    // adapters can be dropped once the widgets are in the tree.
    let mounted = container
        .mount(build_datasets(), ChartViewConfig::default())
        .len();
    if mounted == 0 {
        tracing::warn!("no charts could be mounted");
    }

    let scroller = gtk::ScrolledWindow::builder().child(&root).build();
    let window = gtk::ApplicationWindow::builder()
        .application(app)
        .title("ohlc-view GTK demo")
        .default_width(CHART_WIDTH as i32 + 40)
        .default_height(900)
        .child(&scroller)
        .build();

    window.present();
}

fn build_datasets() -> Vec<Dataset> {
    [1_709_251_200_i64, 1_709_856_000, 1_710_460_800]
        .into_iter()
        .enumerate()
        .map(|(chunk, chunk_start)| Dataset {
            chunk_start,
            bars: build_wave_bars(chunk_start, 96, 100.0 + chunk as f64 * 25.0),
        })
        .collect()
}

fn build_wave_bars(start: i64, count: usize, base_price: f64) -> Vec<Bar> {
    let mut previous_close = base_price;
    (0..count)
        .map(|index| {
            let x = index as f64;
            let close = base_price + (x / 6.0).sin() * 4.0 + (x / 17.0).cos() * 7.0;
            let open = previous_close;
            let spread = 0.8 + (x / 5.0).sin().abs() * 1.5;
            let high = open.max(close) + spread;
            let low = open.min(close) - spread;
            previous_close = close;
            Bar::new(
                start + index as i64 * BAR_INTERVAL_SECONDS,
                open,
                high,
                low,
                close,
                1_000 + (index as u64 % 7) * 250,
            )
        })
        .collect()
}
