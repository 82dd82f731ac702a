//! Embedded assets
//!
//! SQL migrations are compiled into the binary so a deployment is a single
//! executable plus its config file.

use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "migrations/"]
pub struct MigrationAssets;

impl MigrationAssets {
    /// All embedded migrations, sorted by filename so the numeric prefix
    /// dictates apply order.
    pub fn get_migrations() -> Vec<(String, String)> {
        let mut migrations: Vec<(String, String)> = Self::iter()
            .filter(|path| path.ends_with(".sql"))
            .filter_map(|path| {
                Self::get(&path).map(|file| {
                    (
                        path.to_string(),
                        String::from_utf8_lossy(file.data.as_ref()).to_string(),
                    )
                })
            })
            .collect();
        migrations.sort_by(|a, b| a.0.cmp(&b.0));
        migrations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_embedded_in_order() {
        let migrations = MigrationAssets::get_migrations();
        assert!(!migrations.is_empty());
        let names: Vec<&str> = migrations.iter().map(|(name, _)| name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
