pub mod config;
mod http;
pub mod lodging;
pub mod synth;
pub mod transport;

pub use config::{build_http_client, ProviderConfig};
pub use lodging::{filter_by_budget, LodgingResolver};
pub use synth::SynthesisClient;
pub use transport::{TransportResolver, TransportStrategy};
