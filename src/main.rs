//! Portfolio Sims entry point
//!
//! On wasm, mounts each simulation whose canvas is present on the page and
//! drives it from `requestAnimationFrame`. Natively, runs every simulation
//! headless and logs its telemetry.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_host {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use portfolio_sims::error::Result;
    use portfolio_sims::highscores::{HighScore, SIEGE_KEY};
    use portfolio_sims::platform::canvas::CanvasSurface;
    use portfolio_sims::platform::input::{KeyState, SequenceDetector, lander_captures, siege_char};
    use portfolio_sims::renderer::{DrawSurface, RenderState, VertexBatch};
    use portfolio_sims::sim::{
        Algorithm, FlockState, FrameLoop, FrameOutcome, LanderState, LanderStatus, SiegePhase, SiegeState,
        SortCommand, SortState,
    };
    use portfolio_sims::{Settings, Tuning};

    /// One mounted simulation with its own animation-frame chain
    trait Widget {
        fn frame(&mut self, time_ms: f64) -> FrameOutcome;
        fn pause(&mut self);
        /// True if the host should re-arm
        fn resume(&mut self) -> bool;
        /// Whether a frame callback is already scheduled
        fn armed(&mut self) -> &mut bool;
    }

    type Shared = Rc<RefCell<dyn Widget>>;

    fn document() -> Option<Document> {
        web_sys::window().and_then(|w| w.document())
    }

    fn seed() -> u64 {
        js_sys::Date::now() as u64
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(id: &str, hidden: bool) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    fn canvas_by_id(id: &str) -> Option<HtmlCanvasElement> {
        document()?.get_element_by_id(id)?.dyn_into().ok()
    }

    /// Backing-store size for a canvas at the current device pixel ratio
    fn client_size(canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        (
            (canvas.client_width() as f64 * dpr) as u32,
            (canvas.client_height() as f64 * dpr) as u32,
        )
    }

    fn on_click(id: &str, mut handler: impl FnMut() + 'static) {
        if let Some(btn) = document().and_then(|d| d.get_element_by_id(id)) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| handler());
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Schedule the next frame unless one is pending
    fn arm(widget: Shared) {
        {
            let mut w = widget.borrow_mut();
            let armed = w.armed();
            if *armed {
                return;
            }
            *armed = true;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        let next = widget.clone();
        let closure = Closure::once(move |time: f64| {
            let outcome = {
                let mut w = next.borrow_mut();
                *w.armed() = false;
                w.frame(time)
            };
            if outcome == FrameOutcome::Continue {
                arm(next);
            }
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Surface handed to the loop, None once the canvas has left the page
    fn attached(surface: &mut CanvasSurface) -> Option<&mut dyn DrawSurface> {
        if surface.is_connected() {
            surface.fit_to_client();
            Some(surface)
        } else {
            None
        }
    }

    // === Flock background ===

    enum FlockTarget {
        Gpu {
            canvas: HtmlCanvasElement,
            render: RenderState,
            batch: VertexBatch,
        },
        Canvas(CanvasSurface),
    }

    struct FlockHost {
        lp: FrameLoop<FlockState>,
        target: FlockTarget,
        armed: bool,
    }

    impl Widget for FlockHost {
        fn frame(&mut self, time_ms: f64) -> FrameOutcome {
            match &mut self.target {
                FlockTarget::Gpu { canvas, render, batch } => {
                    let (w, h) = client_size(canvas);
                    if (w, h) != render.size && w > 0 && h > 0 {
                        canvas.set_width(w);
                        canvas.set_height(h);
                        render.resize(w, h);
                    }
                    batch.resize(render.size.0 as f32, render.size.1 as f32);
                    let surface: Option<&mut dyn DrawSurface> = if canvas.is_connected() {
                        Some(&mut *batch)
                    } else {
                        None
                    };
                    let outcome = self.lp.on_frame(time_ms, &(), surface);
                    if outcome == FrameOutcome::Continue && canvas.is_connected() {
                        match render.render(batch) {
                            Ok(()) => {}
                            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                render.resize(render.size.0, render.size.1);
                            }
                            Err(e) => log::warn!("Flock render error: {e:?}"),
                        }
                    }
                    outcome
                }
                FlockTarget::Canvas(surface) => self.lp.on_frame(time_ms, &(), attached(surface)),
            }
        }

        fn pause(&mut self) {
            self.lp.stop();
        }

        fn resume(&mut self) -> bool {
            self.lp.resume()
        }

        fn armed(&mut self) -> &mut bool {
            &mut self.armed
        }
    }

    async fn gpu_target(canvas: HtmlCanvasElement) -> Result<FlockTarget> {
        let (width, height) = client_size(&canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Flock using adapter: {:?}", adapter.get_info().name);

        let render = RenderState::new(surface, &adapter, width, height).await?;
        Ok(FlockTarget::Gpu {
            canvas,
            render,
            batch: VertexBatch::new(width as f32, height as f32),
        })
    }

    async fn mount_flock(tuning: &Tuning) -> Option<Shared> {
        let canvas = canvas_by_id("flock-canvas")?;
        let target = match gpu_target(canvas.clone()).await {
            Ok(target) => target,
            Err(e) => {
                log::warn!("WebGPU unavailable for flock ({e}), falling back to Canvas2D");
                match CanvasSurface::new(canvas) {
                    Ok(surface) => FlockTarget::Canvas(surface),
                    Err(e) => {
                        log::error!("Flock disabled: {e}");
                        return None;
                    }
                }
            }
        };
        let host: Shared = Rc::new(RefCell::new(FlockHost {
            lp: FrameLoop::new(FlockState::new(seed(), tuning.flock.clone())),
            target,
            armed: false,
        }));
        Some(host)
    }

    // === Gravity lander ===

    struct LanderHost {
        lp: FrameLoop<LanderState>,
        surface: CanvasSurface,
        keys: KeyState,
        armed: bool,
        last_status: LanderStatus,
    }

    impl LanderHost {
        fn start(&mut self) {
            let mut sim = LanderState::new(seed(), self.lp.sim().config.clone());
            self.surface.fit_to_client();
            let (w, h) = self.surface.size();
            sim.start(w, h);
            self.lp.reset(sim);
            self.keys.release_all();
        }

        fn update_hud(&mut self) {
            let t = self.lp.sim().telemetry();
            set_text("lander-fuel", &format!("{:.0}%", t.fuel_percent));
            set_text("lander-vx", &format!("{:.2}", t.vx));
            set_text("lander-vy", &format!("{:.2}", t.vy));
            set_text("lander-altitude", &format!("{:.0}", t.altitude));
            if t.status != self.last_status {
                self.last_status = t.status;
                let message = match t.status {
                    LanderStatus::Ready => "Press start to launch".to_string(),
                    LanderStatus::Descending => String::new(),
                    LanderStatus::Landed => format!("Landed! Score {}", t.score.unwrap_or(0)),
                    LanderStatus::Destroyed => "Destroyed".to_string(),
                };
                set_text("lander-message", &message);
                set_hidden("lander-overlay", t.status == LanderStatus::Descending);
            }
        }
    }

    impl Widget for LanderHost {
        fn frame(&mut self, time_ms: f64) -> FrameOutcome {
            let input = self.keys.lander_input();
            let outcome = self.lp.on_frame(time_ms, &input, attached(&mut self.surface));
            self.update_hud();
            outcome
        }

        fn pause(&mut self) {
            self.keys.release_all();
            self.lp.stop();
        }

        fn resume(&mut self) -> bool {
            self.lp.resume()
        }

        fn armed(&mut self) -> &mut bool {
            &mut self.armed
        }
    }

    fn mount_lander(tuning: &Tuning) -> Option<Rc<RefCell<LanderHost>>> {
        let surface = CanvasSurface::from_id("lander-canvas")
            .map_err(|e| log::info!("Lander not mounted: {e}"))
            .ok()?;
        surface.fit_to_client();
        let host = Rc::new(RefCell::new(LanderHost {
            lp: FrameLoop::new(LanderState::new(seed(), tuning.lander.clone())),
            surface,
            keys: KeyState::default(),
            armed: false,
            last_status: LanderStatus::Descending,
        }));

        let button = host.clone();
        on_click("lander-start", move || {
            button.borrow_mut().start();
            arm(button.clone());
        });
        Some(host)
    }

    // === Syntax siege ===

    struct SiegeHost {
        lp: FrameLoop<SiegeState>,
        surface: CanvasSurface,
        typed: Vec<char>,
        best: HighScore,
        armed: bool,
    }

    impl SiegeHost {
        fn start(&mut self) {
            let config = self.lp.sim().config.clone();
            self.lp.reset(SiegeState::playing(seed(), config, self.best.best()));
            self.typed.clear();
            set_hidden("siege-game-over", true);
            set_hidden("siege-start", true);
        }

        fn update_hud(&mut self) {
            let t = self.lp.sim().telemetry();
            set_text("siege-score", &t.score.to_string());
            set_text("siege-health", &format!("{:.0}%", t.health_percent));
            set_text("siege-high-score", &t.high_score.max(self.best.best()).to_string());
            if t.phase == SiegePhase::GameOver {
                set_text("siege-final-score", &t.score.to_string());
                set_hidden("siege-new-high-score", !t.new_high_score);
                set_hidden("siege-game-over", false);
            }
        }
    }

    impl Widget for SiegeHost {
        fn frame(&mut self, time_ms: f64) -> FrameOutcome {
            let typed = std::mem::take(&mut self.typed);
            let outcome = self.lp.on_frame(time_ms, &typed, attached(&mut self.surface));
            self.update_hud();

            let sim = self.lp.sim();
            if sim.phase == SiegePhase::GameOver && self.best.record(sim.score) {
                self.best.save();
            }
            outcome
        }

        fn pause(&mut self) {
            self.lp.stop();
        }

        fn resume(&mut self) -> bool {
            self.lp.resume()
        }

        fn armed(&mut self) -> &mut bool {
            &mut self.armed
        }
    }

    fn mount_siege(tuning: &Tuning) -> Option<Rc<RefCell<SiegeHost>>> {
        let surface = CanvasSurface::from_id("siege-canvas")
            .map_err(|e| log::info!("Siege not mounted: {e}"))
            .ok()?;
        surface.fit_to_client();
        let best = HighScore::load(SIEGE_KEY);
        let host = Rc::new(RefCell::new(SiegeHost {
            lp: FrameLoop::new(SiegeState::new(seed(), tuning.siege.clone(), best.best())),
            surface,
            typed: Vec::new(),
            best,
            armed: false,
        }));

        for id in ["siege-start-btn", "siege-restart-btn"] {
            let button = host.clone();
            on_click(id, move || {
                button.borrow_mut().start();
                arm(button.clone());
            });
        }
        Some(host)
    }

    // === Sorting visualizer ===

    struct SortHost {
        lp: FrameLoop<SortState>,
        surface: CanvasSurface,
        pending: Option<SortCommand>,
        shown: Option<(Algorithm, Option<usize>)>,
        armed: bool,
    }

    impl SortHost {
        fn update_panel(&mut self) {
            let t = self.lp.sim().telemetry();
            set_text("sort-comparisons", &t.comparisons.to_string());
            set_text("sort-accesses", &t.accesses.to_string());

            let shown = (t.algorithm, t.active_line);
            if self.shown == Some(shown) {
                return;
            }
            if self.shown.map(|(a, _)| a) != Some(t.algorithm) {
                set_text("sort-name", t.name);
                set_text("sort-complexity", t.complexity);
                set_text("sort-description", t.algorithm.description());
                set_text("sort-code", t.algorithm.code());
            }
            if let Some(el) = document().and_then(|d| d.get_element_by_id("sort-code")) {
                let line = t.active_line.map(|l| l.to_string()).unwrap_or_default();
                let _ = el.set_attribute("data-active-line", &line);
            }
            self.shown = Some(shown);
        }
    }

    impl Widget for SortHost {
        fn frame(&mut self, time_ms: f64) -> FrameOutcome {
            let command = self.pending.take();
            let outcome = self.lp.on_frame(time_ms, &command, attached(&mut self.surface));
            self.update_panel();
            outcome
        }

        fn pause(&mut self) {
            self.lp.stop();
        }

        fn resume(&mut self) -> bool {
            self.lp.resume()
        }

        fn armed(&mut self) -> &mut bool {
            &mut self.armed
        }
    }

    fn mount_sorting(tuning: &Tuning) -> Option<Rc<RefCell<SortHost>>> {
        let surface = CanvasSurface::from_id("sort-canvas")
            .map_err(|e| log::info!("Sort visualizer not mounted: {e}"))
            .ok()?;
        surface.fit_to_client();
        let host = Rc::new(RefCell::new(SortHost {
            lp: FrameLoop::new(SortState::new(seed(), tuning.sorting.clone())),
            surface,
            pending: None,
            shown: None,
            armed: false,
        }));

        let commands = [("sort-run", SortCommand::Run), ("sort-reset", SortCommand::Reset)]
            .into_iter()
            .map(|(id, cmd)| (id.to_string(), cmd))
            .chain(
                Algorithm::ALL
                    .into_iter()
                    .map(|a| (format!("sort-{}", a.key()), SortCommand::Select(a))),
            );
        for (id, command) in commands {
            let button = host.clone();
            on_click(&id, move || button.borrow_mut().pending = Some(command));
        }
        Some(host)
    }

    // === Page-wide input ===

    fn setup_keyboard(lander: Option<Rc<RefCell<LanderHost>>>, siege: Option<Rc<RefCell<SiegeHost>>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut konami = SequenceDetector::konami();

        {
            let lander = lander.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if konami.push(&event.key()) {
                    log::info!("Konami code entered");
                    if let Some(body) = document().and_then(|d| d.body()) {
                        let _ = body.class_list().toggle("konami");
                    }
                }

                if let Some(lander) = &lander {
                    let mut host = lander.borrow_mut();
                    let code = event.code();
                    if host.lp.sim().status == LanderStatus::Descending && lander_captures(&code) {
                        event.prevent_default();
                    }
                    host.keys.apply(&code, true);
                }

                if let Some(siege) = &siege {
                    let mut host = siege.borrow_mut();
                    if host.lp.sim().phase == SiegePhase::Playing {
                        if let Some(c) = siege_char(&event.key()) {
                            host.typed.push(c);
                        }
                    }
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(lander) = lander {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut host = lander.borrow_mut();
                let code = event.code();
                if host.lp.sim().status == LanderStatus::Descending && lander_captures(&code) {
                    event.prevent_default();
                }
                host.keys.apply(&code, false);
            });
            let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Stop every loop while the tab is hidden and re-arm on return
    fn setup_visibility(widgets: Vec<Shared>) {
        let Some(doc) = document() else {
            return;
        };
        let watched = doc.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let hidden = watched.visibility_state() == web_sys::VisibilityState::Hidden;
            for widget in &widgets {
                if hidden {
                    widget.borrow_mut().pause();
                } else if widget.borrow_mut().resume() {
                    arm(widget.clone());
                }
            }
            log::debug!("Visibility changed, hidden: {hidden}");
        });
        let _ = doc.add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Tuning embedded as `<script id="sim-tuning" type="application/json">`
    fn page_tuning() -> Tuning {
        let Some(json) = document()
            .and_then(|d| d.get_element_by_id("sim-tuning"))
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        Tuning::from_json(&json).unwrap_or_else(|e| {
            log::error!("Ignoring page tuning: {e}");
            Tuning::default()
        })
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Portfolio sims starting...");

        let settings = Settings::load();
        let mut tuning = page_tuning();
        settings.apply(&mut tuning);

        let mut widgets: Vec<Shared> = Vec::new();

        if settings.flock_enabled() {
            if let Some(flock) = mount_flock(&tuning).await {
                widgets.push(flock);
            }
        } else {
            log::info!("Flock background disabled by settings");
        }

        let lander = mount_lander(&tuning);
        if let Some(lander) = &lander {
            widgets.push(lander.clone());
        }
        let siege = mount_siege(&tuning);
        if let Some(siege) = &siege {
            widgets.push(siege.clone());
        }
        if let Some(sorting) = mount_sorting(&tuning) {
            widgets.push(sorting);
        }

        setup_keyboard(lander, siege);
        setup_visibility(widgets.clone());

        for widget in &widgets {
            arm(widget.clone());
        }
        log::info!("{} simulations mounted", widgets.len());
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    web_host::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use portfolio_sims::error::Result;
    use portfolio_sims::renderer::VertexBatch;
    use portfolio_sims::sim::{
        Algorithm, FlockState, Frame, FrameLoop, LanderInput, LanderState, SiegeState, SortCommand, SortPhase,
        SortState,
    };
    use portfolio_sims::{HighScore, Settings, Tuning};
    use portfolio_sims::highscores::SIEGE_KEY;

    const WIDTH: f32 = 800.0;
    const HEIGHT: f32 = 500.0;
    const FLOCK_FRAMES: u64 = 600;
    const MAX_FRAMES: u64 = 100_000;

    fn timestamp(index: u64) -> f64 {
        Frame::fixed(index, WIDTH, HEIGHT).timestamp_ms
    }

    fn log_json<T: serde::Serialize>(label: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => log::info!("{label}: {json}"),
            Err(e) => log::warn!("{label}: unserializable telemetry ({e})"),
        }
    }

    fn load_tuning() -> Result<Tuning> {
        match std::env::args().nth(1) {
            Some(path) => {
                let json = std::fs::read_to_string(&path)?;
                log::info!("Tuning loaded from {path}");
                Tuning::from_json(&json)
            }
            None => Ok(Tuning::default()),
        }
    }

    pub fn run() -> Result<()> {
        let settings = Settings::load();
        let mut tuning = load_tuning()?;
        settings.apply(&mut tuning);
        let mut batch = VertexBatch::new(WIDTH, HEIGHT);

        // Flock
        let mut flock = FrameLoop::new(FlockState::new(1, tuning.flock.clone()));
        for i in 0..FLOCK_FRAMES {
            flock.on_frame(timestamp(i), &(), Some(&mut batch));
        }
        let sim = flock.sim();
        let mean_speed =
            sim.agents.iter().map(|a| a.velocity.length()).sum::<f32>() / sim.agents.len().max(1) as f32;
        log::info!(
            "Flock: {} agents, {} leaders, mean speed {:.4} after {} frames",
            sim.agents.len(),
            sim.leader_count(),
            mean_speed,
            sim.frames
        );

        // Lander, hands off the controls until it comes down
        let mut lander = FrameLoop::new(LanderState::launched(2, tuning.lander.clone(), WIDTH, HEIGHT));
        let mut i = 0;
        while lander.is_running() && i < MAX_FRAMES {
            lander.on_frame(timestamp(i), &LanderInput::default(), Some(&mut batch));
            i += 1;
        }
        log_json("Lander", &lander.sim().telemetry());

        // Siege, unattended until the base falls
        let mut best = HighScore::load(SIEGE_KEY);
        let mut siege = FrameLoop::new(SiegeState::playing(3, tuning.siege.clone(), best.best()));
        let mut i = 0;
        while siege.is_running() && i < MAX_FRAMES {
            siege.on_frame(timestamp(i), &Vec::new(), Some(&mut batch));
            i += 1;
        }
        log_json("Siege", &siege.sim().telemetry());
        if best.record(siege.sim().score) {
            best.save();
        }

        // Every sorting algorithm to completion
        for algorithm in Algorithm::ALL {
            let mut sort = FrameLoop::new(SortState::new(4, tuning.sorting.clone()));
            sort.on_frame(0.0, &Some(SortCommand::Select(algorithm)), Some(&mut batch));
            sort.on_frame(timestamp(0), &Some(SortCommand::Run), Some(&mut batch));
            let mut i = 1;
            while sort.sim().phase != SortPhase::Idle && i < MAX_FRAMES {
                sort.on_frame(timestamp(i), &None, Some(&mut batch));
                i += 1;
            }
            log_json("Sort", &sort.sim().telemetry());
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Portfolio sims (native, headless) starting...");

    if let Err(e) = headless::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
