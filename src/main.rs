// Sorting Algorithm Visualizer
//
// Animates comparison-based sorting algorithms over a random list of
// integers, drawn as colored vertical bars.
// - R regenerates the list (any time), SPACE starts sorting
// - A / D pick ascending / descending while idle
// - I / B / S / Q pick the algorithm while idle
// - The active sorter performs one swap or shift per tick; the two indices
//   it touched are highlighted green and red

mod font;
mod sorts;

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::info;
use rand::Rng;
use vello::kurbo::{Affine, Rect};
use vello::peniko::{Color, Fill};
use vello::util::{RenderContext, RenderSurface};
use vello::{AaConfig, AaSupport, Renderer, RendererOptions, Scene};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use crate::sorts::{Algorithm, SortOrder, SortStepper, Step};

const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 600;
const LIST_LEN: usize = 50;
const VALUE_MIN: i32 = 0;
const VALUE_MAX: i32 = 100;
// Horizontal padding split evenly between both sides; vertical padding
// reserves the HUD strip at the top.
const SIDE_PAD: f64 = 100.0;
const TOP_PAD: f64 = 150.0;
const FRAME_INTERVAL: Duration = Duration::from_micros(1_000_000 / 120);
// Flat pause after each sorting step, keeping the animation watchable.
const STEP_DELAY: Duration = Duration::from_millis(20);

const BACKGROUND: Color = Color::BLACK;
const TITLE_COLOR: Color = Color::rgb8(0, 255, 0);
const LEGEND_COLOR: Color = Color::WHITE;
const HIGHLIGHT_LEAD: Color = Color::rgb8(0, 255, 0);
const HIGHLIGHT_TRAIL: Color = Color::rgb8(255, 0, 0);
const BAR_GRADIENT: [Color; 3] = [
    Color::rgb8(128, 128, 128),
    Color::rgb8(160, 160, 160),
    Color::rgb8(192, 192, 192),
];

const TITLE_SCALE: f64 = 3.0;
const LEGEND_SCALE: f64 = 2.0;

fn generate_values(rng: &mut impl Rng) -> Vec<i32> {
    (0..LIST_LEN)
        .map(|_| rng.gen_range(VALUE_MIN..=VALUE_MAX))
        .collect()
}

// ============================================================================
// View geometry
// ============================================================================

/// Pixel geometry derived from the current list; recomputed on reset, never
/// during a sort (sorting changes neither length nor value bounds).
struct ViewParams {
    min_val: i32,
    bar_width: f64,
    unit_height: f64,
    start_x: f64,
}

impl ViewParams {
    fn for_values(values: &[i32]) -> Self {
        let min_val = values.iter().copied().min().unwrap_or(VALUE_MIN);
        let max_val = values.iter().copied().max().unwrap_or(VALUE_MAX);
        // All-equal lists would otherwise zero the divisor.
        let span = (max_val - min_val).max(1) as f64;
        let len = values.len().max(1) as f64;
        ViewParams {
            min_val,
            bar_width: ((WINDOW_WIDTH as f64 - SIDE_PAD) / len).round(),
            unit_height: ((WINDOW_HEIGHT as f64 - TOP_PAD) / span).floor(),
            start_x: SIDE_PAD / 2.0,
        }
    }
}

// ============================================================================
// Visualizer state machine
// ============================================================================

/// The pure half of the application: the list, its view geometry, the
/// selected algorithm and order, and the active sorter if one is running.
struct Visualizer {
    values: Vec<i32>,
    view: ViewParams,
    order: SortOrder,
    algorithm: Algorithm,
    stepper: Option<Box<dyn SortStepper>>,
}

impl Visualizer {
    fn new(values: Vec<i32>) -> Self {
        Visualizer {
            view: ViewParams::for_values(&values),
            values,
            order: SortOrder::Ascending,
            algorithm: Algorithm::Bubble,
            stepper: None,
        }
    }

    fn sorting(&self) -> bool {
        self.stepper.is_some()
    }

    /// Replaces the list and recomputes the view geometry. Any running sort
    /// is discarded; the algorithm and order selections survive.
    fn reset(&mut self, values: Vec<i32>) {
        self.stepper = None;
        self.view = ViewParams::for_values(&values);
        self.values = values;
    }

    fn start(&mut self) {
        if self.stepper.is_none() {
            info!(
                "starting {} ({})",
                self.algorithm.name(),
                self.order.label()
            );
            self.stepper = Some(self.algorithm.stepper(self.order));
        }
    }

    /// Advances the active sorter by one step. Returns `None` while idle,
    /// including the tick that notices exhaustion and drops back to idle.
    fn tick(&mut self) -> Option<Step> {
        let stepper = self.stepper.as_mut()?;
        match stepper.advance(&mut self.values) {
            Some(step) => Some(step),
            None => {
                info!("{} finished", self.algorithm.name());
                self.stepper = None;
                None
            }
        }
    }

    fn set_order(&mut self, order: SortOrder) {
        if self.stepper.is_none() {
            self.order = order;
        }
    }

    fn set_algorithm(&mut self, algorithm: Algorithm) {
        if self.stepper.is_none() {
            self.algorithm = algorithm;
        }
    }
}

// ============================================================================
// Scene building
// ============================================================================

fn draw_bars(scene: &mut Scene, viz: &Visualizer, step: Option<&Step>) {
    let view = &viz.view;
    let touched = step.and_then(|s| s.touched);
    for (i, &value) in viz.values.iter().enumerate() {
        let x = view.start_x + i as f64 * view.bar_width;
        let y = WINDOW_HEIGHT as f64 - (value - view.min_val) as f64 * view.unit_height;
        let mut color = BAR_GRADIENT[i % 3];
        if let Some([lead, trail]) = touched {
            if i == lead {
                color = HIGHLIGHT_LEAD;
            }
            if i == trail {
                color = HIGHLIGHT_TRAIL;
            }
        }
        scene.fill(
            Fill::NonZero,
            Affine::IDENTITY,
            color,
            None,
            &Rect::new(x, y, x + view.bar_width, WINDOW_HEIGHT as f64),
        );
    }
}

fn draw_hud(scene: &mut Scene, viz: &Visualizer) {
    let width = WINDOW_WIDTH as f64;
    let title = format!("{} - {}", viz.algorithm.name(), viz.order.label());
    font::draw_text_centered(scene, &title, width, 5.0, TITLE_SCALE, TITLE_COLOR);
    font::draw_text_centered(
        scene,
        "R - RESET | SPACE - START SORTING | A - ASCENDING | D - DESCENDING",
        width,
        45.0,
        LEGEND_SCALE,
        LEGEND_COLOR,
    );
    font::draw_text_centered(
        scene,
        "I - INSERTION | B - BUBBLE | S - SELECTION | Q - QUICK",
        width,
        75.0,
        LEGEND_SCALE,
        LEGEND_COLOR,
    );
}

fn build_scene(viz: &Visualizer, step: Option<&Step>) -> Scene {
    let mut scene = Scene::new();
    // While sorting only the bar field is drawn; the HUD comes back once the
    // run finishes.
    if !viz.sorting() {
        draw_hud(&mut scene, viz);
    }
    draw_bars(&mut scene, viz, step);
    scene
}

// ============================================================================
// Application & event handling
// ============================================================================

struct App {
    viz: Visualizer,
    window: Option<Arc<Window>>,
    render_cx: Option<RenderContext>,
    render_surface: Option<RenderSurface<'static>>,
    renderer: Option<Renderer>,
    next_tick: Instant,
}

impl App {
    fn new(viz: Visualizer) -> Self {
        App {
            viz,
            window: None,
            render_cx: None,
            render_surface: None,
            renderer: None,
            next_tick: Instant::now(),
        }
    }

    fn handle_key(&mut self, key: Key) {
        match key.as_ref() {
            Key::Character("r") | Key::Character("R") => {
                info!("reset: regenerating list");
                self.viz.reset(generate_values(&mut rand::thread_rng()));
            }
            Key::Named(NamedKey::Space) => self.viz.start(),
            Key::Character("a") | Key::Character("A") => {
                self.viz.set_order(SortOrder::Ascending);
            }
            Key::Character("d") | Key::Character("D") => {
                self.viz.set_order(SortOrder::Descending);
            }
            Key::Character("i") | Key::Character("I") => {
                self.viz.set_algorithm(Algorithm::Insertion);
            }
            Key::Character("b") | Key::Character("B") => {
                self.viz.set_algorithm(Algorithm::Bubble);
            }
            Key::Character("s") | Key::Character("S") => {
                self.viz.set_algorithm(Algorithm::Selection);
            }
            Key::Character("q") | Key::Character("Q") => {
                self.viz.set_algorithm(Algorithm::Quick);
            }
            _ => {}
        }
    }

    /// One loop tick: advance the sort if one is running, redraw, and
    /// schedule the next tick.
    fn render_frame(&mut self) {
        let step = self.viz.tick();
        let scene = build_scene(&self.viz, step.as_ref());

        if let Some(window) = &self.window {
            window.pre_present_notify();
        }

        if let (Some(renderer), Some(surface), Some(render_cx)) = (
            &mut self.renderer,
            &mut self.render_surface,
            &self.render_cx,
        ) {
            let device = &render_cx.devices[surface.dev_id].device;
            let queue = &render_cx.devices[surface.dev_id].queue;

            let width = surface.config.width;
            let height = surface.config.height;
            let surface_texture = surface
                .surface
                .get_current_texture()
                .expect("failed to get surface texture");

            renderer
                .render_to_surface(
                    device,
                    queue,
                    &scene,
                    &surface_texture,
                    &vello::RenderParams {
                        base_color: BACKGROUND,
                        width,
                        height,
                        antialiasing_method: AaConfig::Area,
                    },
                )
                .expect("failed to render to surface");

            surface_texture.present();
        }

        let pause = if step.is_some() {
            FRAME_INTERVAL + STEP_DELAY
        } else {
            FRAME_INTERVAL
        };
        self.next_tick = Instant::now() + pause;
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("Sorting Algorithm Visualization")
            .with_resizable(false)
            .with_inner_size(winit::dpi::PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .expect("failed to create window"),
        );

        let mut render_cx = RenderContext::new();
        let size = window.inner_size();
        let render_surface = pollster::block_on(render_cx.create_surface(
            window.clone(),
            size.width,
            size.height,
            wgpu::PresentMode::AutoVsync,
        ))
        .expect("failed to create surface");

        let device = &render_cx.devices[render_surface.dev_id].device;

        let renderer = Renderer::new(
            device,
            RendererOptions {
                surface_format: Some(render_surface.format),
                use_cpu: false,
                antialiasing_support: AaSupport::area_only(),
                num_init_threads: None,
            },
        )
        .expect("failed to create renderer");

        self.window = Some(window.clone());
        self.render_cx = Some(render_cx);
        self.render_surface = Some(render_surface);
        self.renderer = Some(renderer);

        window.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("shutting down");
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.handle_key(logical_key);
            }
            WindowEvent::Resized(size) => {
                if let (Some(render_cx), Some(render_surface)) =
                    (&mut self.render_cx, &mut self.render_surface)
                {
                    render_cx.resize_surface(render_surface, size.width, size.height);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if Instant::now() >= self.next_tick {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_tick));
    }
}

fn main() {
    env_logger::init();

    let values = generate_values(&mut rand::thread_rng());
    info!(
        "generated {} values in [{VALUE_MIN}, {VALUE_MAX}]",
        values.len()
    );

    let event_loop = EventLoop::new().expect("failed to create event loop");
    let mut app = App::new(Visualizer::new(values));
    event_loop
        .run_app(&mut app)
        .expect("failed to run event loop");
}
