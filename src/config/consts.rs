// src/config/consts.rs

// Net config
pub const BASE: &str = "https://so.gushiwen.cn";
/// Unknown poem ids get redirected here instead of a 404.
pub const ROOT_REDIRECT: &str = "https://www.gushiwen.cn/";
pub const SEARCH_PATH: &str = "/search.aspx";
pub const CAPTCHA_PATH: &str = "/RandCode.ashx";
pub const LOGIN_PATH: &str = "/user/login.aspx";
pub const USER_AGENT: &str = "gushi_scrape/1.2";
pub const TIMEOUT_SECS: u64 = 15;

// Search
/// The site only ever serves two pages of title search results.
pub const SEARCH_PAGES: [u32; 2] = [1, 2];

// Login
pub const LOGIN_ATTEMPTS: usize = 5;
pub const LOGIN_SUBMIT: &str = "\u{767b}\u{5f55}"; // 登录

// Text markers embedded by the site templates
pub const TRANSLATION_LABEL: &str = "\u{8bd1}\u{6587}"; // 译文
pub const NOTES_LABEL: &str = "\u{6ce8}\u{91ca}"; // 注释
pub const BRIEF_MARKER: char = '\u{25ba}'; // ►

// Layout
/// Full-width period, question mark, exclamation mark, semicolon.
pub const DEFAULT_DELIMITERS: [char; 4] = ['\u{3002}', '\u{ff1f}', '\u{ff01}', '\u{ff1b}'];
/// Tuned for a typical IDE console font; other fonts want other values.
pub const DEFAULT_FILL_LENGTH: usize = 7;

pub fn author_url(id: &str) -> String {
    join!(BASE, "/authorv_", id, ".aspx")
}

pub fn poetry_url(id: &str) -> String {
    join!(BASE, "/shiwenv_", id, ".aspx")
}
