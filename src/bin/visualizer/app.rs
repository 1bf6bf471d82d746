use macroquad::prelude::*;
use macroquad::ui::{root_ui, widgets};

use physics_visualizer::config::SimConfig;
use physics_visualizer::core::window::WorldView;
use physics_visualizer::sim::{SimulationHost, SimulationKind};

use crate::constants::{
    BACKGROUND, ERROR_COLOR, MSAA_SAMPLES, PANEL_POS, PANEL_SIZE, SELECTOR_POS, SELECTOR_SIZE,
};
use crate::gfx::MacroquadGraphics;
use crate::input::{FrameActions, hotkey_actions};
use crate::panel::{ColorSkins, MacroquadPanel, widget_id};

pub(crate) fn window_conf(config: &SimConfig) -> Conf {
    Conf {
        window_title: config.window.title.clone(),
        window_width: config.window.width,
        window_height: config.window.height,
        high_dpi: true,
        sample_count: MSAA_SAMPLES,
        ..Default::default()
    }
}

/// Starts `kind`, remembering the failure for the selector window.
fn start(
    host: &mut SimulationHost,
    kind: SimulationKind,
    gfx: &mut MacroquadGraphics,
    last_error: &mut Option<String>,
) {
    *last_error = match host.switch_to(kind, gfx) {
        Ok(()) => None,
        Err(err) => Some(format!("{} failed: {err}", kind.title())),
    };
}

/// One button per simulation plus the last start-up error.
fn draw_selector(active: Option<SimulationKind>, last_error: Option<&str>) -> FrameActions {
    let mut actions = FrameActions::default();
    widgets::Window::new(widget_id("Simulations"), SELECTOR_POS, SELECTOR_SIZE)
        .label("Simulations")
        .ui(&mut *root_ui(), |ui| {
            for (i, kind) in SimulationKind::ALL.into_iter().enumerate() {
                let marker = if active == Some(kind) { ">" } else { " " };
                if ui.button(None, format!("{marker} {} ({})", kind.title(), i + 1).as_str()) {
                    actions.switch_to = Some(kind);
                }
            }
            if let Some(err) = last_error {
                ui.label(None, err);
            }
        });
    actions
}

pub(crate) async fn run(config: SimConfig) {
    let initial = config.initial_simulation;
    let mut host = SimulationHost::new(config);
    let mut gfx = MacroquadGraphics::new();
    let mut skins = ColorSkins::default();
    let mut last_error = None;

    start(&mut host, initial, &mut gfx, &mut last_error);

    loop {
        let frame_dt = get_frame_time();

        let actions = hotkey_actions().merge(draw_selector(
            host.active_kind(),
            last_error.as_deref(),
        ));
        if actions.quit {
            break;
        }
        if let Some(kind) = actions.switch_to {
            start(&mut host, kind, &mut gfx, &mut last_error);
        }

        clear_background(BACKGROUND);
        gfx.set_view(WorldView::scene(screen_width(), screen_height()));

        if let Some(kind) = host.active_kind() {
            let input = actions.frame_input();
            let mut outcome = Ok(());
            widgets::Window::new(widget_id(kind.title()), PANEL_POS, PANEL_SIZE)
                .label(kind.title())
                .ui(&mut *root_ui(), |ui| {
                    let mut panel = MacroquadPanel::new(ui, &mut skins);
                    outcome = host.frame(frame_dt, &input, &mut gfx, &mut panel);
                });
            if let Err(err) = outcome {
                log::warn!("Frame rejected: {err}");
            }
        } else if let Some(err) = &last_error {
            draw_text(err, SELECTOR_POS.x, PANEL_POS.y + 20.0, 20.0, ERROR_COLOR);
        }

        next_frame().await;
    }

    host.shutdown(&mut gfx);
    log::info!("Visualizer closed");
}
