use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_test_logger() {
    INIT.call_once(|| {
        // Initialize logger only once
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

pub const FOLLOWERS_DIR: &str = "connections/followers_and_following";

/// Write a stored (uncompressed) ZIP with the given entries.
pub fn write_zip(dir: &Path, name: &str, files: &[(&str, &str)]) -> PathBuf {
    let zip_path = dir.join(name);
    let file = fs::File::create(&zip_path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options =
        zip::write::SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    for (entry_name, content) in files {
        writer.start_file(entry_name.to_string(), options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
    zip_path
}

/// One followers JSON part: `[{"title": "", "string_list_data": [{"value": ..}]}]`.
pub fn json_followers_part(users: &[(&str, Option<i64>)]) -> String {
    let entries: Vec<serde_json::Value> = users
        .iter()
        .map(|(name, ts)| {
            let mut item = serde_json::json!({
                "href": format!("https://www.instagram.com/{name}"),
                "value": name,
            });
            if let Some(ts) = ts {
                item["timestamp"] = serde_json::json!(ts);
            }
            serde_json::json!({
                "title": "",
                "media_list_data": [],
                "string_list_data": [item],
            })
        })
        .collect();
    serde_json::to_string_pretty(&entries).unwrap()
}

/// Following JSON document: `{"relationships_following": [{"title": .., ..}]}`.
pub fn json_following(users: &[(&str, Option<i64>)]) -> String {
    let entries: Vec<serde_json::Value> = users
        .iter()
        .map(|(name, ts)| {
            let mut item = serde_json::json!({
                "href": format!("https://www.instagram.com/_u/{name}"),
            });
            if let Some(ts) = ts {
                item["timestamp"] = serde_json::json!(ts);
            }
            serde_json::json!({ "title": name, "string_list_data": [item] })
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({ "relationships_following": entries }))
        .unwrap()
}

pub fn html_followers(users: &[(&str, Option<&str>)]) -> String {
    let mut body = String::new();
    for (name, date) in users {
        body.push_str(&format!(
            "<div class=\"pam _3-95 _2ph- _a6-g uiBoxWhite noborder\"><div class=\"_a6-p\"><div><div>\
             <a target=\"_blank\" href=\"https://www.instagram.com/{name}\">{name}</a></div>"
        ));
        if let Some(date) = date {
            body.push_str(&format!("<div>{date}</div>"));
        }
        body.push_str("</div></div></div>\n");
    }
    wrap_html("Followers", &body)
}

pub fn html_following(users: &[(&str, Option<&str>)]) -> String {
    let mut body = String::new();
    for (name, date) in users {
        body.push_str(&format!(
            "<div class=\"pam _3-95 _2ph- _a6-g uiBoxWhite noborder\">\
             <h2 class=\"_3-95 _2pim _a6-h _a6-i\">{name}</h2><div class=\"_a6-p\"><div><div>\
             <a target=\"_blank\" href=\"https://www.instagram.com/_u/{name}\">https://www.instagram.com/_u/{name}</a></div>"
        ));
        if let Some(date) = date {
            body.push_str(&format!("<div>{date}</div>"));
        }
        body.push_str("</div></div></div>\n");
    }
    wrap_html("Following", &body)
}

fn wrap_html(title: &str, body: &str) -> String {
    format!(
        "<html><head><meta charset=\"utf-8\" /><title>{title}</title></head>\
         <body class=\"_5vb_ _2yq _a7o5\"><div class=\"_a705\"><main class=\"_a706\" role=\"main\">\n{body}</main></div></body></html>"
    )
}
