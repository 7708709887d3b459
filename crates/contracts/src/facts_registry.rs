use alloy_sol_types::sol;

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface FactsRegistry {
        /// Storage value attested for `account` at `blockNumber`, zero if never proven.
        function accountStorageSlotValues(address account, uint256 blockNumber, bytes32 slot)
            external
            view
            returns (bytes32);
    }
}
