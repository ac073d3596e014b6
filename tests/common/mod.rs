#![allow(dead_code)]

use chrono_tz::Europe::Rome;
use instanalytics_lib::services::history::HistoryStore;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Once;
use tempfile::TempDir;

static INIT: Once = Once::new();

pub const FOLLOWERS_DIR: &str = "connections/followers_and_following";

pub struct TestContext {
    pub dir: TempDir,
    pub store: HistoryStore,
}

impl TestContext {
    /// Write a stored ZIP into the scratch directory.
    pub fn zip(&self, name: &str, files: &[(String, String)]) -> PathBuf {
        let zip_path = self.dir.path().join(name);
        let file = fs::File::create(&zip_path).expect("create zip");
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);

        for (entry_name, content) in files {
            writer.start_file(entry_name.as_str(), options).expect("start entry");
            writer.write_all(content.as_bytes()).expect("write entry");
        }
        writer.finish().expect("finish zip");
        zip_path
    }
}

pub fn init_test_context() -> TestContext {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });

    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = HistoryStore::new(dir.path().join("HistoricalData"), Rome)
        .expect("Failed to create history store");
    TestContext { dir, store }
}

pub fn entry(name: &str) -> String {
    format!("{FOLLOWERS_DIR}/{name}")
}

pub fn json_followers(names: &[&str]) -> String {
    let entries: Vec<serde_json::Value> = names
        .iter()
        .map(|name| {
            serde_json::json!({
                "title": "",
                "media_list_data": [],
                "string_list_data": [{
                    "href": format!("https://www.instagram.com/{name}"),
                    "value": name,
                    "timestamp": 1_700_000_000,
                }],
            })
        })
        .collect();
    serde_json::to_string_pretty(&entries).expect("serialize followers")
}

pub fn json_following(names: &[&str]) -> String {
    let entries: Vec<serde_json::Value> = names
        .iter()
        .map(|name| {
            serde_json::json!({
                "title": name,
                "string_list_data": [{
                    "href": format!("https://www.instagram.com/_u/{name}"),
                    "timestamp": 1_700_000_000,
                }],
            })
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({ "relationships_following": entries }))
        .expect("serialize following")
}

pub fn html_page(body: &str) -> String {
    format!(
        "<html><head><title>Export</title></head><body class=\"_5vb_ _2yq\">\
         <main role=\"main\">\n{body}</main></body></html>"
    )
}

pub fn html_followers(names: &[&str]) -> String {
    let body: String = names
        .iter()
        .map(|name| {
            format!(
                "<div class=\"pam _3-95\"><div><a target=\"_blank\" \
                 href=\"https://www.instagram.com/{name}\">{name}</a></div>\
                 <div>Nov 27, 2025 1:12 am</div></div>\n"
            )
        })
        .collect();
    html_page(&body)
}

pub fn html_following(names: &[&str]) -> String {
    let body: String = names
        .iter()
        .map(|name| {
            format!(
                "<div class=\"pam _3-95\"><h2 class=\"_3-95 _2pim _a6-h _a6-i\">{name}</h2>\
                 <div>Nov 26, 2025 9:05 pm</div></div>\n"
            )
        })
        .collect();
    html_page(&body)
}
