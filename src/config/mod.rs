mod defaults;
mod loader;

pub use defaults::LightWalletConfig;
pub use loader::{ENV_PREFIX, get_default_config, load_configuration, write_config_to};
