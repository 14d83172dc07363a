mod app;

use app::DemoApp;
use clap::Parser;
use std::path::PathBuf;
use time_picker::{LocaleBundle, LocaleConfig};

#[derive(Parser, Debug)]
#[command(version, about = "Showcase of a controlled and an uncontrolled time picker")]
struct Args {
    /// Locale file with a [time_picker] table
    #[arg(long, conflicts_with = "lang")]
    locale: Option<PathBuf>,
    /// Built-in locale (zh_CN or en_US)
    #[arg(long)]
    lang: Option<String>,
    /// Time format, e.g. "HH:mm:ss", "HH:mm" or "hh:mm A"
    #[arg(short, long, default_value = time_picker::DEFAULT_FORMAT)]
    format: String,
}

fn load_locale(args: &Args) -> Option<LocaleConfig> {
    if let Some(path) = &args.locale {
        match LocaleConfig::from_file(path) {
            Ok(config) => return Some(config),
            Err(e) => log::error!("Falling back to the default locale: {e}"),
        }
    }
    if let Some(lang) = &args.lang {
        match LocaleBundle::builtin(lang) {
            Ok(bundle) => return Some(LocaleConfig::new(bundle)),
            Err(e) => log::error!("Falling back to the default locale: {e}"),
        }
    }
    None
}

fn main() -> eframe::Result {
    // Redirect log messages to the console
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let locale = load_locale(&args);
    log::info!("Using format {:?}", args.format);

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([420.0, 360.0])
            .with_min_inner_size([320.0, 240.0])
            .with_title("Time picker"),
        ..Default::default()
    };
    eframe::run_native(
        "Time picker demo",
        native_options,
        Box::new(move |_cc| Ok(Box::new(DemoApp::new(&args.format, locale)))),
    )
}
