//! Composition root helpers for runtime wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::chain::ChainSubmitter;
use crate::adapter::outbound::llm::anthropic::Anthropic;
use crate::adapter::outbound::llm::openai::OpenAi;
use crate::application::extract::{Extractor, FallbackExtractor, GrammarExtractor, ModelExtractor};
use crate::application::{
    DepositFlow, Pipeline, ReplyDispatcher, ReplyFormatter, SubmissionQueue, Validator,
};
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::llm::LlmProvider;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::llm::Llm;
use crate::port::outbound::market::MarketSubmitter;

/// Use cases wired for every surface of one process.
///
/// All pipelines share one submission queue, so submissions from different
/// surfaces signed by the same wallet never overlap.
#[derive(Clone)]
pub struct Components {
    /// Grammar-only pipeline used by the Twitter and Telegram surfaces.
    pub pipeline: Pipeline,
    /// Pipeline for the conversational surface; falls back to the model.
    pub chat_pipeline: Pipeline,
    pub deposits: DepositFlow,
    /// Model extractor, when model-backed extraction is enabled.
    pub model: Option<Arc<ModelExtractor>>,
    pub dispatcher: Arc<ReplyDispatcher>,
}

/// Wire the use cases around `submitter` and `dispatcher`.
pub fn build_components(
    config: &Config,
    submitter: Arc<dyn MarketSubmitter>,
    dispatcher: ReplyDispatcher,
    llm: Option<Arc<dyn Llm>>,
) -> Components {
    let validator = Arc::new(Validator::new(config.market.defaults()));
    let formatter = Arc::new(ReplyFormatter::new(config.frontend_url()));
    let dispatcher = Arc::new(dispatcher);
    let queue = Arc::new(SubmissionQueue::new());

    let grammar: Arc<dyn Extractor> = Arc::new(GrammarExtractor::new());
    let pipeline = Pipeline::new(
        Arc::clone(&grammar),
        Arc::clone(&validator),
        submitter,
        queue,
        Arc::clone(&dispatcher),
    )
    .with_formatter(Arc::clone(&formatter));

    let model = llm.map(|llm| Arc::new(ModelExtractor::new(llm)));
    let chat_pipeline = match &model {
        Some(model) => {
            let secondary: Arc<dyn Extractor> = Arc::clone(model) as Arc<dyn Extractor>;
            pipeline.with_extractor(Arc::new(FallbackExtractor::new(grammar, secondary)))
        }
        None => pipeline.clone(),
    };

    let deposits = DepositFlow::new(validator, Arc::clone(&dispatcher), formatter);

    Components {
        pipeline,
        chat_pipeline,
        deposits,
        model,
        dispatcher,
    }
}

/// Build the on-chain submitter.
///
/// # Errors
///
/// Returns an error if the signing key, RPC URL or contract address is unusable.
#[allow(clippy::result_large_err)]
pub fn build_submitter(config: &Config) -> Result<Arc<ChainSubmitter>> {
    let submitter = ChainSubmitter::new(&config.chain)?;
    info!(
        wallet = %submitter.wallet_address(),
        contract = %submitter.contract_address(),
        "Market submitter initialized"
    );
    Ok(Arc::new(submitter))
}

/// Build the LLM client when model-backed extraction is enabled.
///
/// # Errors
///
/// Returns an error if the provider key is missing or the client cannot be built.
#[allow(clippy::result_large_err)]
pub fn build_llm_client(config: &Config) -> Result<Option<Arc<dyn Llm>>> {
    if !config.llm.enabled {
        return Ok(None);
    }

    let api_key = config.llm.api_key.clone().ok_or(ConfigError::MissingField {
        field: config.llm.provider.api_key_var(),
    })?;

    let client: Arc<dyn Llm> = match config.llm.provider {
        LlmProvider::Anthropic => Arc::new(Anthropic::from_config(&config.llm.anthropic, api_key)?),
        LlmProvider::OpenAi => Arc::new(OpenAi::from_config(&config.llm.openai, api_key)?),
    };

    info!(provider = client.name(), "LLM client initialized");
    Ok(Some(client))
}
