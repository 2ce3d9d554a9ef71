use log::Level;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Tag manager and session recording only run on the deployed build.
#[cfg(debug_assertions)]
pub fn analytics_enabled() -> bool {
    false
}

#[cfg(not(debug_assertions))]
pub fn analytics_enabled() -> bool {
    true
}

pub const GTM_CONTAINER_ID: &str = "GTM-MX9G66K5";
pub const CLARITY_PROJECT_ID: &str = "tv6ktpt37l";

pub const PAGE_TITLE: &str = "たくやの投資チャンネル｜投資力診断";
pub const PAGE_DESCRIPTION: &str = "たくやの投資チャンネルによる資産形成診断ページ";

pub const CTA_URL: &str = "https://utage-system.com/line/open/3mD1cVatRxfv";

pub const HERO_IMAGE: &str = "/hero-catch.png";
pub const CASE_IMAGES: [(&str, &str); 2] = [
    ("/case1.png", "グラフ・成果イメージ"),
    ("/case2.png", "実績・サンプルデータ"),
];
pub const OPERATOR_ICON: &str = "/operator-icon.png";
