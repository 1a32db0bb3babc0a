//! Solidity interface definitions for on-chain interactions.
//!
//! Contains the minimal ABI surface the SDK encodes against:
//! - [`IERC6551Registry`] - account factory (`createAccount`, `account`)
//! - [`IERC6551Account`] - account entry points (`executeCall`, `token`)
//! - [`IAccountProxy`] - zero-argument initializer passed as `initData`
//! - [`IERC20`], [`IERC721`], [`IERC1155`] - transfer calls made through an account

use alloy_sol_types::sol;

sol! {
    /// ERC-6551 registry interface.
    ///
    /// Reference: <https://eips.ethereum.org/EIPS/eip-6551>
    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    interface IERC6551Registry {
        function createAccount(
            address implementation,
            uint256 chainId,
            address tokenContract,
            uint256 tokenId,
            uint256 seed,
            bytes calldata initData
        ) external returns (address);

        function account(
            address implementation,
            uint256 chainId,
            address tokenContract,
            uint256 tokenId,
            uint256 salt
        ) external view returns (address);
    }
}

sol! {
    /// ERC-6551 account interface (v1 `executeCall` flavour).
    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    interface IERC6551Account {
        function executeCall(address to, uint256 value, bytes calldata data)
            external
            payable
            returns (bytes memory result);

        function token()
            external
            view
            returns (uint256 chainId, address tokenContract, uint256 tokenId);
    }
}

sol! {
    /// Initializer invoked by the registry right after the proxy is deployed.
    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    interface IAccountProxy {
        function initialize() external;
    }
}

sol! {
    /// Minimal ERC-20 transfer interface.
    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    interface IERC20 {
        function transfer(address to, uint256 amount) external returns (bool);
    }
}

sol! {
    /// Minimal ERC-721 transfer interface.
    ///
    /// Only the three-argument `safeTransferFrom` is declared so the call type
    /// is not suffixed as an overload.
    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    interface IERC721 {
        function safeTransferFrom(address from, address to, uint256 tokenId) external;
    }
}

sol! {
    /// Minimal ERC-1155 transfer interface.
    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    interface IERC1155 {
        function safeTransferFrom(
            address from,
            address to,
            uint256 id,
            uint256 amount,
            bytes data
        ) external;
    }
}
