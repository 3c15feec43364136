pub mod init_platform;
pub mod update_parameters;
pub mod update_treasury;
pub mod pause;
pub mod cancel_market;

pub use init_platform::*;
pub use update_parameters::*;
pub use update_treasury::*;
pub use pause::*;
pub use cancel_market::*;
