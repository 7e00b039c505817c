use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};

use super::StaticConfig;

/// 环境变量前缀，示例：OL__SERVER__PORT=9999
pub const ENV_PREFIX: &str = "OL";

/// 默认配置文件
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// 默认配置目录，目录下所有 `*.toml` 都会被加载
pub const DEFAULT_CONFIG_DIR: &str = "./toml";

impl StaticConfig {
    /// 从 TOML 文件、配置目录和环境变量加载配置
    ///
    /// 优先级：ENV > 配置目录（按文件名排序，后者覆盖前者）> 配置文件 > 默认值
    pub fn load(config_file: Option<&str>, config_dir: Option<&str>) -> Result<Self, ConfigError> {
        let file = config_file.unwrap_or(DEFAULT_CONFIG_FILE);
        let dir = config_dir.unwrap_or(DEFAULT_CONFIG_DIR);

        // 显式指定的配置文件必须存在
        let mut builder =
            Config::builder().add_source(File::with_name(file).required(config_file.is_some()));

        for path in collect_toml_files(Path::new(dir)) {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize::<StaticConfig>()
    }

    /// 从 TOML 字符串加载（测试和示例用）
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()?
            .try_deserialize::<StaticConfig>()
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }
}

/// 列出目录下的 `*.toml` 文件（按文件名排序）；目录不存在时返回空
fn collect_toml_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_from_toml_str_partial_sections() {
        let cfg = StaticConfig::from_toml_str(
            r#"
            [server]
            port = 9000

            [database]
            driver = "postgres"
            database = "sales"
            max_open_conns = 25
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.database.driver, "postgres");
        assert_eq!(cfg.database.max_open_conns, 25);
        assert_eq!(cfg.database.max_idle_conns, 2);
        assert!(cfg.ingest.enabled);
    }

    #[test]
    fn test_load_merges_config_dir() {
        let td = TempDir::new().unwrap();
        let dir = td.path().join("toml");
        std::fs::create_dir_all(&dir).unwrap();

        let mut db = std::fs::File::create(dir.join("dbconfig.toml")).unwrap();
        writeln!(db, "[database]\ndriver = \"mysql\"\nserver = \"10.0.0.5\"").unwrap();

        let mut ingest = std::fs::File::create(dir.join("ingest.toml")).unwrap();
        writeln!(ingest, "[ingest]\ninterval_secs = 60\ndelimiter = \";\"").unwrap();

        // 非 toml 文件应被忽略
        std::fs::write(dir.join("README.md"), "ignored").unwrap();

        let cfg = StaticConfig::load(None, Some(dir.to_str().unwrap())).unwrap();

        assert_eq!(cfg.database.driver, "mysql");
        assert_eq!(cfg.database.server, "10.0.0.5");
        assert_eq!(cfg.ingest.interval_secs, 60);
        assert_eq!(cfg.ingest.delimiter, ";");
    }

    #[test]
    fn test_explicit_missing_config_file_fails() {
        let td = TempDir::new().unwrap();
        let missing = td.path().join("nope.toml");
        let result = StaticConfig::load(
            Some(missing.to_str().unwrap()),
            Some(td.path().join("empty").to_str().unwrap()),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_generate_sample_config_roundtrips() {
        let sample = StaticConfig::generate_sample_config();
        assert!(sample.contains("[database]"));
        let parsed = StaticConfig::from_toml_str(&sample).unwrap();
        assert_eq!(parsed.server.port, 26301);
        assert_eq!(parsed.ingest.interval_secs, 86_400);
    }
}
