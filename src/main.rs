use eframe::egui;

use news_race::config::RaceConfig;

mod app;
mod ui;

use app::RaceApp;

/// Hangul-capable system fonts, first hit wins.
const KOREAN_FONT_PATHS: &[&str] = &[
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "C:\\Windows\\Fonts\\malgun.ttf",
];

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = RaceConfig::from_env().unwrap_or_else(|err| {
        log::warn!("{}; using defaults", err);
        RaceConfig::default()
    });
    log::info!("backend: {}", config.api_base);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 900.0]),
        ..Default::default()
    };

    eframe::run_native(
        "News Race",
        options,
        Box::new(move |cc| {
            install_korean_font(&cc.egui_ctx);
            Ok(Box::new(RaceApp::new(config)))
        }),
    )
}

fn install_korean_font(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();
    let Some((path, data)) = KOREAN_FONT_PATHS
        .iter()
        .find_map(|path| std::fs::read(path).ok().map(|data| (*path, data)))
    else {
        log::warn!("no Korean font found; labels may render as boxes");
        return;
    };

    fonts
        .font_data
        .insert("korean".to_owned(), egui::FontData::from_owned(data));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        if let Some(list) = fonts.families.get_mut(&family) {
            list.push("korean".to_owned());
        }
    }
    ctx.set_fonts(fonts);
    log::debug!("loaded font {}", path);
}
