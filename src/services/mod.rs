pub mod analyzer;
pub mod claude;
pub mod github;
pub mod parser;
pub mod pipeline;
pub mod prompt;
pub mod signature;

pub use analyzer::{detect_language, scan_patch, CodeAnalyzer};
pub use claude::{ClaudeClient, CompletionClient, CompletionError};
pub use github::{GithubClient, PlatformClient, PlatformError};
pub use parser::parse_review;
pub use pipeline::{PipelineError, ReviewOutcome, ReviewPipeline};
pub use prompt::build_prompt;
pub use signature::SignatureVerifier;
