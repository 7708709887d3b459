use alloy_sol_types::sol;

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface YABTransfer {
        function transfers(bytes32 index)
            external
            view
            returns (uint256 destAddress, uint256 amount, bool isUsed);
    }
}
