//! GTK4 host glue: one `DrawingArea` per chart view.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use tracing::warn;

use crate::api::{ChartContainer, ChartView, ChartViewConfig, Dataset, mount_charts};
use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::CairoRenderer;

pub type SharedChartView = Rc<RefCell<ChartView<CairoRenderer>>>;

/// Binds a chart view to a `gtk::DrawingArea`.
///
/// Scroll, drag and leave events are forwarded to the view.
/// Handlers repaint the view's offscreen Cairo surface; the draw function only
/// blits that surface.
pub struct GtkChartAdapter {
    view: SharedChartView,
    drawing_area: gtk::DrawingArea,
}

impl GtkChartAdapter {
    #[must_use]
    pub fn new(view: ChartView<CairoRenderer>) -> Self {
        let viewport = view.viewport();
        let view = Rc::new(RefCell::new(view));

        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_content_width(viewport.width as i32);
        drawing_area.set_content_height(viewport.height as i32);

        {
            let view = Rc::clone(&view);
            drawing_area.set_draw_func(move |_, context, _, _| {
                let Ok(chart) = view.try_borrow() else {
                    return;
                };
                let surface = chart.renderer().surface();
                if let Err(err) = context
                    .set_source_surface(surface, 0.0, 0.0)
                    .and_then(|()| context.paint())
                {
                    warn!(error = %err, "failed to blit chart surface");
                }
            });
        }

        attach_gesture_controllers(&drawing_area, &view);
        Self { view, drawing_area }
    }

    #[must_use]
    pub fn view(&self) -> SharedChartView {
        Rc::clone(&self.view)
    }

    #[must_use]
    pub fn drawing_area(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }
}

fn attach_gesture_controllers(drawing_area: &gtk::DrawingArea, view: &SharedChartView) {
    // GTK scroll events carry no position; remember the last pointer location.
    let pointer = Rc::new(Cell::new((0.0, 0.0)));

    let motion = gtk::EventControllerMotion::new();
    {
        let pointer = Rc::clone(&pointer);
        motion.connect_motion(move |_, x, y| pointer.set((x, y)));
    }
    {
        let view = Rc::clone(view);
        motion.connect_leave(move |_| {
            if let Ok(mut chart) = view.try_borrow_mut() {
                chart.on_pointer_leave();
            }
        });
    }
    drawing_area.add_controller(motion);

    let scroll = gtk::EventControllerScroll::new(gtk::EventControllerScrollFlags::VERTICAL);
    {
        let view = Rc::clone(view);
        let pointer = Rc::clone(&pointer);
        let drawing_area = drawing_area.clone();
        scroll.connect_scroll(move |_, _dx, dy| {
            if let Ok(mut chart) = view.try_borrow_mut() {
                let (x, y) = pointer.get();
                log_handler_error("wheel", chart.on_wheel(x, y, dy).map(|_| ()));
                drawing_area.queue_draw();
            }
            gtk::glib::Propagation::Stop
        });
    }
    drawing_area.add_controller(scroll);

    let drag = gtk::GestureDrag::new();
    drag.set_button(gtk::gdk::BUTTON_PRIMARY);
    {
        let view = Rc::clone(view);
        let pointer = Rc::clone(&pointer);
        drag.connect_drag_begin(move |_, start_x, start_y| {
            pointer.set((start_x, start_y));
            if let Ok(mut chart) = view.try_borrow_mut() {
                log_handler_error("drag begin", chart.on_pointer_down(start_x, start_y));
            }
        });
    }
    {
        let view = Rc::clone(view);
        let pointer = Rc::clone(&pointer);
        let drawing_area = drawing_area.clone();
        drag.connect_drag_update(move |gesture, offset_x, offset_y| {
            let Some((start_x, start_y)) = gesture.start_point() else {
                return;
            };
            let (x, y) = (start_x + offset_x, start_y + offset_y);
            pointer.set((x, y));
            if let Ok(mut chart) = view.try_borrow_mut() {
                // Leaving the area ends the pan even though GTK keeps the drag.
                if chart.is_dragging() {
                    log_handler_error("drag update", chart.on_pointer_move(x, y));
                    drawing_area.queue_draw();
                }
            }
        });
    }
    {
        let view = Rc::clone(view);
        drag.connect_drag_end(move |_, _, _| {
            if let Ok(mut chart) = view.try_borrow_mut() {
                chart.on_pointer_up();
            }
        });
    }
    drawing_area.add_controller(drag);
}

fn log_handler_error(event: &str, result: ChartResult<()>) {
    if let Err(err) = result {
        warn!(event, error = %err, "chart event handler failed");
    }
}

/// Vertical `gtk::Box` holding one chart per dataset.
pub struct GtkChartContainer {
    root: gtk::Box,
    viewport: Viewport,
}

impl GtkChartContainer {
    #[must_use]
    pub fn new(root: gtk::Box, viewport: Viewport) -> Self {
        Self { root, viewport }
    }

    #[must_use]
    pub fn root(&self) -> &gtk::Box {
        &self.root
    }

    /// Creates, paints and appends one chart per dataset.
    pub fn mount(&mut self, datasets: Vec<Dataset>, config: ChartViewConfig) -> Vec<GtkChartAdapter> {
        let views = mount_charts(Some(&mut *self), datasets, config);
        views
            .into_iter()
            .map(|(id, view)| {
                let adapter = GtkChartAdapter::new(view);
                adapter.drawing_area().set_widget_name(&id);
                self.root.append(adapter.drawing_area());
                adapter
            })
            .collect()
    }
}

impl ChartContainer for GtkChartContainer {
    type Surface = CairoRenderer;

    fn create_surface(&mut self, chart_id: &str) -> ChartResult<(CairoRenderer, Viewport)> {
        let width = i32::try_from(self.viewport.width);
        let height = i32::try_from(self.viewport.height);
        let (Ok(width), Ok(height)) = (width, height) else {
            return Err(ChartError::SurfaceUnavailable {
                id: chart_id.to_owned(),
                reason: "surface size exceeds i32".to_owned(),
            });
        };
        let renderer = CairoRenderer::new(width, height)?;
        Ok((renderer, self.viewport))
    }
}
