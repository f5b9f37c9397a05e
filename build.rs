use std::fs;

fn main() {
    // Validate default config at compile time
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");

    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    // The list metrics drive prefix alignment, so they must all be present
    let list = table
        .get("list")
        .and_then(|v| v.as_table())
        .expect("default_config.toml is missing the [list] table");
    for key in ["max_digit_width", "content_margin", "prefix_gap_width", "prefix_color"] {
        if !list.contains_key(key) {
            panic!("default_config.toml: [list] is missing `{}`", key);
        }
    }
}
