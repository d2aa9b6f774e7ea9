use assert_impl::assert_impl;
use derive_builder::Builder;
use getset::{CopyGetters, Getters};
use serde::Deserialize;
use std::{fmt, fs, io, ops::Deref, path::Path, sync::Arc};
use thiserror::Error;

/// WebHDFS 文件系统配置
#[derive(Builder, Getters, CopyGetters)]
#[builder(
    name = "ConfigBuilder",
    pattern = "owned",
    public,
    build_fn(name = "inner_build", private, validate = "Self::validate")
)]
pub struct ConfigInner {
    /// 是否使用 HTTPS 访问 WebHDFS
    #[get_copy = "pub"]
    #[builder(default = "default::use_ssl()")]
    use_ssl: bool,

    /// NameNode 主机名
    #[get = "pub"]
    #[builder(setter(into), default = "default::host()")]
    host: String,

    /// WebHDFS 端口
    #[get_copy = "pub"]
    #[builder(default = "default::webhdfs_port()")]
    webhdfs_port: u16,

    #[builder(setter(into, strip_option), default)]
    user: Option<String>,

    #[builder(setter(into, strip_option), default)]
    token: Option<String>,
}

pub mod default {
    pub fn use_ssl() -> bool {
        false
    }

    pub fn host() -> String {
        "localhost".to_owned()
    }

    pub fn webhdfs_port() -> u16 {
        50070
    }
}

impl ConfigInner {
    /// 用户身份，作为 `user.name` 参数附加在每个请求上
    #[inline]
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// 委托令牌，作为 `delegation` 参数附加在每个请求上
    #[inline]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// 获取 URL 协议
    #[inline]
    pub fn scheme(&self) -> &'static str {
        if self.use_ssl {
            "https"
        } else {
            "http"
        }
    }
}

impl fmt::Debug for ConfigInner {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Config")
            .field("use_ssl", &self.use_ssl)
            .field("host", &self.host)
            .field("webhdfs_port", &self.webhdfs_port)
            .field("user", &self.user)
            .field("token", &self.token.as_ref().map(|_| "******"))
            .finish()
    }
}

/// WebHDFS 文件系统配置
///
/// 可以被廉价地复制，所有副本共享同一份配置
#[derive(Clone, Debug)]
pub struct Config(Arc<ConfigInner>);

/// 配置错误
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    /// 配置项不合法
    #[error("invalid configuration: {0}")]
    Invalid(#[from] ConfigBuilderError),

    /// 读取配置文件失败
    #[error("failed to read configuration file: {0}")]
    Io(#[from] io::Error),

    /// 解析配置文件失败
    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigBuilder {
    /// 构建 WebHDFS 文件系统配置
    pub fn build(self) -> Result<Config, ConfigError> {
        Ok(Config(Arc::new(self.inner_build()?)))
    }

    fn validate(&self) -> Result<(), String> {
        match self.host.as_deref() {
            Some("") => Err("host must not be empty".to_owned()),
            Some(host) if host.contains(&['/', '?', '#'][..]) => Err(format!("host {:?} is not a bare host name", host)),
            _ => Ok(()),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
struct ConfigFile {
    hdfs_host: Option<String>,
    webhdfs_port: Option<u16>,
    hdfs_user: Option<String>,
    token: Option<String>,
    use_ssl: Option<bool>,
}

impl Config {
    /// 创建 WebHDFS 文件系统配置构建器
    #[inline]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// 从 JSON 配置文件中读取配置
    ///
    /// 支持的配置项有 `hdfs-host`，`webhdfs-port`，`hdfs-user`，`token` 和 `use-ssl`，均为可选项
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read(path.as_ref())?;
        Self::from_json_slice(&content)
    }

    /// 从 JSON 数据中读取配置
    pub fn from_json_slice(json: &[u8]) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_json::from_slice(json)?;
        let mut builder = Self::builder();
        if let Some(host) = file.hdfs_host {
            builder = builder.host(host);
        }
        if let Some(port) = file.webhdfs_port {
            builder = builder.webhdfs_port(port);
        }
        if let Some(user) = file.hdfs_user {
            builder = builder.user(user);
        }
        if let Some(token) = file.token {
            builder = builder.token(token);
        }
        if let Some(use_ssl) = file.use_ssl {
            builder = builder.use_ssl(use_ssl);
        }
        builder.build()
    }

    #[allow(dead_code)]
    fn ignore() {
        assert_impl!(Send: Self);
        assert_impl!(Sync: Self);
    }
}

impl Default for Config {
    fn default() -> Self {
        Config(Arc::new(ConfigInner {
            use_ssl: default::use_ssl(),
            host: default::host(),
            webhdfs_port: default::webhdfs_port(),
            user: None,
            token: None,
        }))
    }
}

impl Deref for Config {
    type Target = ConfigInner;

    #[inline]
    fn deref(&self) -> &ConfigInner {
        self.0.deref()
    }
}
