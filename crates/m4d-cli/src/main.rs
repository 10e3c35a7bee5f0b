use clap::{Parser, Subcommand};
use log::{error, info};
use m4d_input::coin::RewardedAds;
use m4d_input::controller::{Services, TouchController};
use m4d_input::eligibility::{Orientation, deciding_rule, is_eligible, visible_buttons};
use m4d_input::host::{Emulator, Host};
use m4d_input::layout::InputLayout;
use m4d_input::pointer::{MotionAction, MotionEvent, Pointer};
use m4d_input::prefs;
use m4d_input::values::{DigitalMask, mask_names};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(about = "Inspect MAME4droid touch layouts and probe the touch controller")]
struct Args {
    /// Input preferences file (defaults to the per-user config location)
    #[arg(long, global = true)]
    prefs: Option<PathBuf>,

    /// Treat the layout as the portrait controller
    #[arg(long, global = true)]
    portrait: bool,

    /// View size the layout is fitted to, e.g. 1920x1080
    #[arg(long, global = true, value_parser = parse_size)]
    view: Option<(i32, i32)>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every region of a layout resource
    Dump {
        /// Layout resource file
        layout: PathBuf,
    },
    /// Press fingers at the given points and print the resulting input mask
    Probe {
        /// Layout resource file
        layout: PathBuf,

        /// Touch points as x,y (one finger each)
        #[arg(required = true, value_parser = parse_point)]
        points: Vec<(f32, f32)>,

        /// Pretend the emulator is showing a menu
        #[arg(long)]
        menu: bool,

        /// Pretend a save/load dialog is open
        #[arg(long)]
        save_load: bool,

        /// Button count reported by the running game
        #[arg(long)]
        game_buttons: Option<u8>,

        /// Stick ways reported by the running game
        #[arg(long)]
        game_ways: Option<u8>,
    },
}

fn parse_pair<T: std::str::FromStr>(raw: &str, sep: char) -> Result<(T, T), String> {
    let (a, b) = raw
        .split_once(sep)
        .ok_or_else(|| format!("expected two values separated by '{sep}'"))?;
    let a = a.trim().parse().map_err(|_| format!("invalid value '{a}'"))?;
    let b = b.trim().parse().map_err(|_| format!("invalid value '{b}'"))?;
    Ok((a, b))
}

fn parse_size(raw: &str) -> Result<(i32, i32), String> {
    parse_pair(raw, 'x')
}

fn parse_point(raw: &str) -> Result<(f32, f32), String> {
    parse_pair(raw, ',')
}

/// Emulator stand-in that only remembers the last published mask.
struct ProbeEmulator {
    in_menu: bool,
    in_save_load: bool,
    buttons: Option<u8>,
    ways: Option<u8>,
    in_options: bool,
    published: DigitalMask,
}

impl Emulator for ProbeEmulator {
    fn set_digital_data(&mut self, _slot: usize, mask: DigitalMask) {
        self.published = mask;
    }

    fn set_exit_game(&mut self, value: bool) {
        info!("exit signal -> {value}");
    }

    fn is_in_menu(&self) -> bool {
        self.in_menu
    }

    fn is_in_game(&self) -> bool {
        !self.in_menu
    }

    fn is_in_save_load(&self) -> bool {
        self.in_save_load
    }

    fn is_in_options(&self) -> bool {
        self.in_options
    }

    fn set_in_options(&mut self, value: bool) {
        self.in_options = value;
    }

    fn num_ways(&self) -> Option<u8> {
        self.ways
    }

    fn num_buttons(&self) -> Option<u8> {
        self.buttons
    }
}

struct LoggingHost;

impl Host for LoggingHost {
    fn vibrate(&mut self) {
        info!("vibrate");
    }

    fn show_options_dialog(&mut self) {
        info!("options dialog requested");
    }

    fn show_toast(&mut self, message: &str) {
        info!("toast: {message}");
    }
}

struct NoAds;

impl RewardedAds for NoAds {
    fn load(&mut self) {
        info!("rewarded ad load requested");
    }

    fn is_ready(&self) -> bool {
        false
    }

    fn show(&mut self) {}
}

fn load_layout(path: &Path) -> Option<InputLayout> {
    match InputLayout::load_from_file(path) {
        Ok(layout) => Some(layout),
        Err(e) => {
            error!("{}: {e}", path.display());
            None
        }
    }
}

fn dump(controller: &TouchController, emulator: &ProbeEmulator) {
    let layout = controller.layout();
    let state = controller.app_state(emulator);
    println!(
        "{} regions, {} visible buttons ({})",
        layout.len(),
        visible_buttons(&state),
        deciding_rule(&state).unwrap_or("none")
    );
    for region in layout.regions() {
        println!(
            "{:<12} {:>3} {} {}",
            format!("{:?}", region.kind),
            region.value,
            region.rect,
            if is_eligible(region, &state) { "active" } else { "-" }
        );
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let prefs_path = args.prefs.unwrap_or_else(prefs::default_prefs_path);
    let prefs = prefs::load_from_file(&prefs_path);
    let orientation = if args.portrait {
        Orientation::Portrait
    } else {
        Orientation::Landscape
    };

    let (layout_path, mut emulator) = match &args.command {
        Command::Dump { layout } => (
            layout,
            ProbeEmulator {
                in_menu: false,
                in_save_load: false,
                buttons: None,
                ways: None,
                in_options: false,
                published: 0,
            },
        ),
        Command::Probe {
            layout,
            menu,
            save_load,
            game_buttons,
            game_ways,
            ..
        } => (
            layout,
            ProbeEmulator {
                in_menu: *menu,
                in_save_load: *save_load,
                buttons: *game_buttons,
                ways: *game_ways,
                in_options: false,
                published: 0,
            },
        ),
    };

    let Some(layout) = load_layout(layout_path) else {
        return ExitCode::FAILURE;
    };
    let mut controller = TouchController::new(layout, prefs, orientation);
    if let Some((w, h)) = args.view {
        controller.set_view_size(w, h);
    }

    match args.command {
        Command::Dump { .. } => dump(&controller, &emulator),
        Command::Probe { points, .. } => {
            let pointers = points
                .iter()
                .enumerate()
                .map(|(id, &(x, y))| Pointer::new(id as u32, x, y))
                .collect();
            let event = MotionEvent::new(MotionAction::Down, 0, pointers);

            let mut host = LoggingHost;
            let mut ads = NoAds;
            let mut services = Services {
                emulator: &mut emulator,
                host: &mut host,
                ads: &mut ads,
            };
            let mut mask = 0;
            let handled = controller.handle_touch_controller(&event, &mut services, &mut mask);

            println!(
                "handled={handled} mask=0x{mask:05X} [{}]",
                mask_names(mask).join(" ")
            );
            if emulator.published != mask {
                error!("published mask 0x{:05X} differs", emulator.published);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
