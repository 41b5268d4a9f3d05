//! Service configuration.
//!
//! Read once at startup. The binary fills it from flags or the environment
//! (`HOST`, `PORT`, `AWS_REGION`, `QUOTES_BACKEND`); anything unset keeps the
//! default below.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use crate::error::Error;
use crate::store::{MemoryStore, QuoteStore};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_REGION: &str = "us-east-1";

/// Where quotes are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Backend {
    /// In-process map, lost on exit
    Memory,
    /// DynamoDB table `quotes` (requires the `dynamodb` feature)
    Dynamodb,
}

impl Default for Backend {
    fn default() -> Self {
        if cfg!(feature = "dynamodb") { Self::Dynamodb } else { Self::Memory }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// AWS region of the DynamoDB table. Ignored by the memory backend.
    pub region: String,
    pub backend: Backend,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            region: DEFAULT_REGION.to_owned(),
            backend: Backend::default(),
        }
    }
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Instantiates the configured store client.
    pub async fn open_store(&self) -> Result<Arc<dyn QuoteStore>, Error> {
        match self.backend {
            Backend::Memory => Ok(Arc::new(MemoryStore::new())),
            #[cfg(feature = "dynamodb")]
            Backend::Dynamodb => Ok(Arc::new(crate::store::DynamoStore::connect(&self.region).await)),
            #[cfg(not(feature = "dynamodb"))]
            Backend::Dynamodb => Err(Error::Config(
                "the dynamodb backend is not compiled in; rebuild with `--features dynamodb`".to_owned(),
            )),
        }
    }
}
