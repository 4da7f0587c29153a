//! Prediction market contract binding.

use alloy_primitives::{Address, Log, U256};
use alloy_sol_types::{sol, SolEvent};

sol! {
    #[sol(rpc)]
    contract PredictionMarket {
        event MarketCreated(
            uint256 indexed marketId,
            string question,
            string optionA,
            string optionB,
            uint256 endTime
        );

        function createMarket(
            string question,
            string optionA,
            string optionB,
            uint256 duration,
            string category,
            string[] tags,
            uint256 marketFee
        ) external returns (uint256);

        function marketCount() external view returns (uint256);
    }
}

/// First `MarketCreated` id among `logs` emitted by `contract`.
pub fn created_market_id<'a>(
    logs: impl IntoIterator<Item = &'a Log>,
    contract: Address,
) -> Option<U256> {
    logs.into_iter()
        .filter(|log| log.address == contract)
        .find_map(|log| PredictionMarket::MarketCreated::decode_log_data(&log.data).ok())
        .map(|event| event.marketId)
}
