use std::fs;
use std::path::{Path, PathBuf};

/// Browser family of a detected profile
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BrowserType {
    Chrome,
    Firefox,
    Edge,
}

impl BrowserType {
    /// Get a user-friendly display name for the browser
    pub fn display_name(&self) -> &str {
        match self {
            BrowserType::Chrome => "Chrome",
            BrowserType::Firefox => "Firefox",
            BrowserType::Edge => "Edge",
        }
    }

    /// Parse browser type from string (case-insensitive)
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "chrome" | "chromium" => Some(BrowserType::Chrome),
            "firefox" => Some(BrowserType::Firefox),
            "edge" => Some(BrowserType::Edge),
            _ => None,
        }
    }
}

/// Browser profile location
#[derive(Debug, Clone)]
pub struct BrowserProfile {
    pub browser: BrowserType,
    pub profile_name: String,
    /// The `Bookmarks` JSON file or `places.sqlite` database
    pub path: PathBuf,
}

impl BrowserProfile {
    pub fn display_string(&self) -> String {
        format!("{} ({})", self.browser.display_name(), self.profile_name)
    }

    /// True when this profile passes the optional browser and profile-name filters.
    pub fn matches(&self, browser: Option<&BrowserType>, profile: Option<&str>) -> bool {
        let browser_ok = browser.map_or(true, |b| *b == self.browser);
        let profile_ok = profile.map_or(true, |p| self.profile_name.eq_ignore_ascii_case(p));
        browser_ok && profile_ok
    }
}

const CHROMIUM_PROFILES: [&str; 5] = ["Default", "Profile 1", "Profile 2", "Profile 3", "Profile 4"];

/// Detect installed browsers and their profile locations
pub fn detect_browsers() -> Vec<BrowserProfile> {
    let home = match std::env::var("HOME") {
        Ok(h) => PathBuf::from(h),
        Err(_) => return Vec::new(),
    };
    detect_browsers_in(&home)
}

/// Same as [`detect_browsers`], rooted at an explicit home directory.
pub fn detect_browsers_in(home: &Path) -> Vec<BrowserProfile> {
    let mut profiles = Vec::new();

    for (browser, base, prefix) in chromium_bases(home) {
        profiles.extend(chromium_profiles(browser, &base, prefix));
    }

    profiles.extend(firefox_profiles(&firefox_base(home)));

    profiles
}

fn chromium_bases(home: &Path) -> Vec<(BrowserType, PathBuf, &'static str)> {
    #[cfg(target_os = "macos")]
    let bases = vec![
        (
            BrowserType::Chrome,
            home.join("Library/Application Support/Google/Chrome"),
            "",
        ),
        (
            BrowserType::Edge,
            home.join("Library/Application Support/Microsoft Edge"),
            "",
        ),
    ];

    #[cfg(target_os = "windows")]
    let bases = vec![
        (
            BrowserType::Chrome,
            home.join("AppData\\Local\\Google\\Chrome\\User Data"),
            "",
        ),
        (
            BrowserType::Edge,
            home.join("AppData\\Local\\Microsoft\\Edge\\User Data"),
            "",
        ),
    ];

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let bases = vec![
        (BrowserType::Chrome, home.join(".config/google-chrome"), ""),
        (BrowserType::Chrome, home.join(".config/chromium"), "Chromium "),
        (BrowserType::Edge, home.join(".config/microsoft-edge"), ""),
    ];

    bases
}

fn firefox_base(home: &Path) -> PathBuf {
    #[cfg(target_os = "macos")]
    let base = home.join("Library/Application Support/Firefox/Profiles");

    #[cfg(target_os = "windows")]
    let base = home.join("AppData\\Roaming\\Mozilla\\Firefox\\Profiles");

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let base = home.join(".mozilla/firefox");

    base
}

fn chromium_profiles(browser: BrowserType, base: &Path, prefix: &str) -> Vec<BrowserProfile> {
    if !base.exists() {
        return Vec::new();
    }

    CHROMIUM_PROFILES
        .iter()
        .filter_map(|profile_name| {
            let bookmarks_path = base.join(profile_name).join("Bookmarks");
            bookmarks_path.exists().then(|| BrowserProfile {
                browser: browser.clone(),
                profile_name: format!("{}{}", prefix, profile_name),
                path: bookmarks_path,
            })
        })
        .collect()
}

fn firefox_profiles(base: &Path) -> Vec<BrowserProfile> {
    let mut profiles = Vec::new();

    // Find all profile directories with places.sqlite
    if let Ok(entries) = fs::read_dir(base) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                let places = path.join("places.sqlite");
                if places.exists() {
                    let profile_name = path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or("Unknown")
                        .to_string();
                    profiles.push(BrowserProfile {
                        browser: BrowserType::Firefox,
                        profile_name,
                        path: places,
                    });
                }
            }
        }
    }

    profiles.sort_by(|a, b| a.profile_name.cmp(&b.profile_name));
    profiles
}
