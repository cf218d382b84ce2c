mod dry_run;
mod emailjs;

pub use dry_run::DryRunProvider;
pub use emailjs::EmailJsProvider;
