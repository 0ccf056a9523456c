//! Browser glue: DOM lookup, the 1 Hz countdown timer and the
//! `requestAnimationFrame` loop. All state lives in one `App` owned by a
//! thread-local slot that both callbacks borrow.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Local};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, window};

use crate::config::{ElementIds, FireworksConfig};
use crate::countdown::{Countdown, CountdownView};
use crate::render::CanvasPainter;
use crate::sim::Simulation;

/// Text regions updated by the countdown.
struct Banners {
    countdown: HtmlElement,
    happy_new_year: HtmlElement,
    good_luck: HtmlElement,
    now_time: HtmlElement,
}

impl Banners {
    fn find(doc: &Document, ids: &ElementIds) -> Result<Self, JsValue> {
        Ok(Self {
            countdown: element(doc, &ids.countdown)?,
            happy_new_year: element(doc, &ids.happy_new_year)?,
            good_luck: element(doc, &ids.good_luck)?,
            now_time: element(doc, &ids.now_time)?,
        })
    }

    fn show(&self, view: &CountdownView) {
        self.now_time.set_text_content(Some(&view.now_text));
        self.countdown.set_text_content(Some(&view.countdown_text));
        set_visible(&self.now_time, true);
        set_visible(&self.countdown, view.show_countdown);
        set_visible(&self.happy_new_year, view.show_celebration);
        set_visible(&self.good_luck, view.show_celebration);
    }
}

struct App {
    sim: Simulation,
    countdown: Countdown,
    painter: CanvasPainter,
    banners: Banners,
}

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub(crate) fn start(config: FireworksConfig) -> Result<(), JsValue> {
    config.validate().map_err(|e| JsValue::from_str(&e.to_string()))?;

    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win.document().ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas: HtmlCanvasElement = element(&doc, &config.elements.canvas)?;
    let width = win
        .inner_width()?
        .as_f64()
        .ok_or_else(|| JsValue::from_str("window width is not a number"))?;
    let height = win
        .inner_height()?
        .as_f64()
        .ok_or_else(|| JsValue::from_str("window height is not a number"))?;
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
        .dyn_into()?;

    let banners = Banners::find(&doc, &config.elements)?;
    let period_ms = config.countdown_period_ms;
    let app = App {
        countdown: Countdown::new(local_now().naive_local(), config.celebration_days),
        sim: Simulation::new(config, width, height, crate::seed()),
        painter: CanvasPainter::new(ctx),
        banners,
    };
    APP.with(|a| a.replace(Some(app)));
    log::info!("fireworks canvas ready ({width}x{height})");

    refresh_countdown();
    start_countdown_timer(&win, period_ms)?;
    start_frame_loop();
    Ok(())
}

fn element<T: JsCast>(doc: &Document, id: &str) -> Result<T, JsValue> {
    doc.get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("no element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{id} has the wrong type")))
}

fn set_visible(el: &HtmlElement, visible: bool) {
    el.style()
        .set_property("display", if visible { "block" } else { "none" })
        .ok();
}

fn local_now() -> DateTime<Local> {
    Local::now()
}

fn refresh_countdown() {
    APP.with(|cell| {
        if let Some(app) = cell.borrow_mut().as_mut() {
            let view = app.countdown.update(&local_now());
            app.banners.show(&view);
            if view.launch_burst {
                app.sim.schedule_burst(crate::performance_now());
            }
        }
    });
}

fn start_countdown_timer(win: &web_sys::Window, period_ms: i32) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(refresh_countdown) as Box<dyn FnMut()>);
    win.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        period_ms,
    )?;
    closure.forget();
    Ok(())
}

fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        APP.with(|cell| {
            if let Some(app) = cell.borrow_mut().as_mut() {
                let frame = app.sim.tick(ts);
                app.painter.paint(&frame);
            }
        });
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}

fn request_frame(callback: &FrameCallback) {
    if let (Some(w), Some(cb)) = (window(), callback.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
