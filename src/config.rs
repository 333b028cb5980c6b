use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// 默认的资源目录：与 crate 自身位于同一目录下的 `file/`
const DEFAULT_ASSET_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/file");

/// 应用配置总结构
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub assets: AssetSettings,
    pub streaming: StreamingSettings,
}

/// 服务相关配置（监听地址、端口）
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// 后端文件配置
///
/// 文件名相对于 `root` 解析，不接受来自请求的路径。
#[derive(Debug, Deserialize, Clone)]
pub struct AssetSettings {
    pub root: PathBuf,
    /// `/buffer` 接口读取并缓存的文件
    pub buffer_file: String,
    /// `/stream` 接口逐块读取并转换的文件
    pub stream_file: String,
}

impl AssetSettings {
    pub fn buffer_path(&self) -> PathBuf {
        self.root.join(&self.buffer_file)
    }

    pub fn stream_path(&self) -> PathBuf {
        self.root.join(&self.stream_file)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StreamingSettings {
    /// 单次文件读取的最大块大小（单位：字节），默认 64KB
    pub chunk_size: usize,
}

impl Settings {
    /// 加载配置：支持默认值、可选配置文件、环境变量覆盖
    pub fn new() -> anyhow::Result<Self> {
        let builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("assets.root", DEFAULT_ASSET_ROOT)?
            .set_default("assets.buffer_file", "buffer.txt")?
            .set_default("assets.stream_file", "stream.txt")?
            .set_default("streaming.chunk_size", 64 * 1024)?
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("VTX").separator("__"));

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.streaming.chunk_size == 0 {
            anyhow::bail!("streaming.chunk_size must be greater than zero");
        }
        Ok(())
    }
}
