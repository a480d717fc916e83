use bevy::prelude::*;
use bevy::log::LogPlugin;
use bevy::window::PresentMode;
use tracing::info;

use yoga_core::config::Config;
use yoga_core::input::events::{Command, ControlEvent};
use yoga_core::input::ControlQueue;
use yoga_core::overlay::{build_overlay, limb_readings, OverlayCommand, Stroke};
use yoga_core::pipeline::classifier::LinearClassifier;
use yoga_core::pipeline::scripted::ScriptedEstimator;
use yoga_core::pipeline::{ModelPipeline, PosePipeline};
use yoga_core::session::{SessionContext, ToggleOutcome};
use yoga_core::storage::JsonFileStore;
use yoga_data::model::PoseClass;

// Resources
#[derive(Resource)]
struct Session(SessionContext<JsonFileStore>);

#[derive(Resource)]
struct Pipeline(ModelPipeline<ScriptedEstimator, LinearClassifier>);

#[derive(Resource)]
struct Controls(ControlQueue);

#[derive(Resource)]
struct FrameLayout {
    width: f32,
    height: f32,
    min_keypoint_score: f32,
}

// Components
#[derive(Component)]
struct StatusDisplay;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("yoga_core=info,wgpu=warn")
        .init();

    let config = Config::load_or_default("yoga.toml")?;
    let recording = yoga_runner::load_recording_json_from_path(&config.viewer.recording)?;
    let weights = yoga_runner::load_classifier_json_from_path(&config.viewer.classifier)?;

    let layout = FrameLayout {
        width: recording.meta.width as f32,
        height: recording.meta.height as f32,
        min_keypoint_score: config.overlay.min_keypoint_score,
    };
    let estimator = ScriptedEstimator::new(recording);
    let classifier = LinearClassifier::new(weights)?;
    let pipeline = ModelPipeline::new(estimator, classifier, config.session.normalization_scale);
    let session = SessionContext::from_config(&config, JsonFileStore::new(&config.storage.dir));

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Yoga Pose".into(),
                resolution: (layout.width.max(640.0), layout.height.max(400.0) + 160.0).into(),
                present_mode: PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }).disable::<LogPlugin>())
        .insert_resource(Session(session))
        .insert_resource(Pipeline(pipeline))
        .insert_resource(Controls(ControlQueue::new()))
        .insert_resource(layout)
        .add_systems(Startup, (setup_camera, setup_status_display))
        .add_systems(PreUpdate, read_keyboard)
        .add_systems(Update, (drive_session, draw_overlay, update_status_display).chain())
        .run();

    Ok(())
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());
}

fn setup_status_display(mut commands: Commands) {
    commands.spawn((
        TextBundle::from_section(
            "",
            TextStyle {
                font_size: 22.0,
                color: Color::WHITE,
                ..default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        }),
        StatusDisplay,
    ));
}

fn read_keyboard(time: Res<Time<Real>>, keys: Res<ButtonInput<KeyCode>>, controls: Res<Controls>) {
    let timestamp = time.elapsed();
    if keys.just_pressed(KeyCode::Space) {
        controls.0.push(ControlEvent {
            timestamp,
            command: Command::Toggle,
        });
    }
    let digits = [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3];
    for (index, key) in digits.into_iter().enumerate() {
        if let (true, Some(pose)) = (keys.just_pressed(key), PoseClass::new(index)) {
            controls.0.push(ControlEvent {
                timestamp,
                command: Command::SelectPose(pose),
            });
        }
    }
}

fn drive_session(
    time: Res<Time<Real>>,
    controls: Res<Controls>,
    mut session: ResMut<Session>,
    mut pipeline: ResMut<Pipeline>,
) {
    let ready = pipeline.0.is_ready();
    for event in controls.0.drain() {
        if let Some(ToggleOutcome::NotReady) = session.0.handle(event, ready) {
            info!("models are still loading");
        }
    }
    let report = session.0.update(time.elapsed(), &mut pipeline.0);
    if let Some(summary) = report.ended {
        info!("session ended: scores={} best={}", summary.scores, summary.best_after);
    }
}

/// Frame pixels (origin top-left, y down) to world space (origin centre, y up).
fn to_world(layout: &FrameLayout, p: Vec2) -> Vec2 {
    Vec2::new(p.x - layout.width / 2.0, layout.height / 2.0 - p.y)
}

fn draw_overlay(mut gizmos: Gizmos, session: Res<Session>, layout: Res<FrameLayout>) {
    if !session.0.state().is_detecting() {
        return;
    }
    let Some(pose) = session.0.last_pose() else {
        return;
    };

    for command in build_overlay(pose, layout.min_keypoint_score) {
        match command {
            OverlayCommand::Dot { at, radius } => {
                gizmos.circle_2d(to_world(&layout, at), radius, Color::srgb(1.0, 1.0, 0.0));
            }
            OverlayCommand::Segment { from, to, stroke } => {
                let color = match stroke {
                    Stroke::Skeleton => Color::srgb(0.0, 1.0, 1.0),
                    Stroke::Good => Color::srgb(0.0, 0.8, 0.0),
                    Stroke::Bad => Color::srgb(0.9, 0.0, 0.0),
                };
                gizmos.line_2d(to_world(&layout, from), to_world(&layout, to), color);
            }
            // Labels go to the status panel; gizmos cannot draw text.
            OverlayCommand::Label { .. } => {}
        }
    }
}

fn update_status_display(session: Res<Session>, mut query: Query<&mut Text, With<StatusDisplay>>) {
    let ctx = &session.0;
    let state = ctx.state();

    let mut lines = vec![format!("[Space] {}   [1-3] pose: {}", state.button_label(), ctx.pose())];
    match state.remaining() {
        Some(remaining) if state.is_detecting() => lines.push(format!("Hold! {remaining}")),
        Some(remaining) => lines.push(format!("Get ready... {remaining}")),
        None => {}
    }
    lines.push(format!("Score: {}   Best: {}", ctx.scores(), ctx.best_scores()));
    if let Some(pose) = ctx.last_pose() {
        for reading in limb_readings(pose) {
            if let Some(label) = reading.label() {
                let mark = if reading.in_range() { "ok" } else { "--" };
                lines.push(format!("{label} {mark}"));
            }
        }
    }

    for mut text in &mut query {
        text.sections[0].value = lines.join("\n");
    }
}
