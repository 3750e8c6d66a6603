pub mod evaluator;
pub mod notifier;
pub mod operator_prompt;
pub mod page_fetcher;
pub mod preference_store;
pub mod sleeper;
