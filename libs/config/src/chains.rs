//! Chain and exchange constants
//!
//! Deployment addresses for the Uniswap-V2 factory and router, the pair
//! contract's fee parameters, and the wrapped-native token of every
//! supported chain. Each address exists both as checksummed text (for
//! configuration files) and as a typed constant (for code).

use hex_literal::hex;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use swapkit_types::{Address, ChainId, Hash32, NativeCurrency, Token, TokenError};

/// Uniswap-V2 factory (same address on every supported chain)
pub const FACTORY_ADDRESS: &str = "0x5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f";
pub const FACTORY: Address = Address::new(hex!("5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f"));

/// keccak256 of the pair contract creation code, used in CREATE2 derivation
pub const INIT_CODE_HASH: &str =
    "0x96e8ac4277198ff8b6f785478aa9a39f403cb768dd02cbee326c3e7da348845f";
pub const INIT_CODE: Hash32 = Hash32::new(hex!(
    "96e8ac4277198ff8b6f785478aa9a39f403cb768dd02cbee326c3e7da348845f"
));

/// Uniswap-V2 Router02
pub const ROUTER_ADDRESS: &str = "0x7a250d5630B4cF539739dF2C5dAcb4c659F2488D";
pub const ROUTER: Address = Address::new(hex!("7a250d5630B4cF539739dF2C5dAcb4c659F2488D"));

/// Swap fee in basis points (0.30%)
pub const FEE_BIPS: u32 = 30;

/// Denominator the fee is expressed against
pub const FEE_DENOMINATOR: u32 = 10_000;

/// Liquidity permanently locked by the first deposit into a pair
pub const MINIMUM_LIQUIDITY: u64 = 1_000;

/// Liquidity token metadata shared by every pair
pub mod liquidity_token {
    pub const DECIMALS: u8 = 18;
    pub const SYMBOL: &str = "UNI-V2";
    pub const NAME: &str = "Uniswap V2";
}

/// Wrapped-ether deployments
pub mod weth {
    use hex_literal::hex;
    use swapkit_types::Address;

    pub const MAINNET: &str = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2";
    pub const ROPSTEN: &str = "0xc778417E063141139Fce010982780140Aa0cD5Ab";
    pub const RINKEBY: &str = "0xc778417E063141139Fce010982780140Aa0cD5Ab";
    pub const GOERLI: &str = "0xB4FBF271143F4FBf7B91A5ded31805e42b2208d6";
    pub const KOVAN: &str = "0xd0A1E359811322d97991E03f863a0C30C2cF029C";

    pub const MAINNET_ADDRESS: Address =
        Address::new(hex!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"));
    pub const ROPSTEN_ADDRESS: Address =
        Address::new(hex!("c778417E063141139Fce010982780140Aa0cD5Ab"));
    pub const RINKEBY_ADDRESS: Address = ROPSTEN_ADDRESS;
    pub const GOERLI_ADDRESS: Address =
        Address::new(hex!("B4FBF271143F4FBf7B91A5ded31805e42b2208d6"));
    pub const KOVAN_ADDRESS: Address =
        Address::new(hex!("d0A1E359811322d97991E03f863a0C30C2cF029C"));
}

/// Chains with a known wrapped-native deployment
pub const SUPPORTED_CHAINS: [ChainId; 5] = [
    ChainId::MAINNET,
    ChainId::ROPSTEN,
    ChainId::RINKEBY,
    ChainId::GOERLI,
    ChainId::KOVAN,
];

/// WETH token per chain, built once on first access
pub static WRAPPED_NATIVE: Lazy<HashMap<ChainId, Token>> = Lazy::new(|| {
    [
        (ChainId::MAINNET, weth::MAINNET_ADDRESS),
        (ChainId::ROPSTEN, weth::ROPSTEN_ADDRESS),
        (ChainId::RINKEBY, weth::RINKEBY_ADDRESS),
        (ChainId::GOERLI, weth::GOERLI_ADDRESS),
        (ChainId::KOVAN, weth::KOVAN_ADDRESS),
    ]
    .into_iter()
    .map(|(chain_id, address)| {
        let token = Token::new(chain_id, address, 18)
            .with_symbol("WETH")
            .with_name("Wrapped Ether");
        (chain_id, token)
    })
    .collect()
});

pub fn is_supported(chain_id: ChainId) -> bool {
    WRAPPED_NATIVE.contains_key(&chain_id)
}

/// The wrapped-native token pairs use on `chain_id`
pub fn wrapped_native(chain_id: ChainId) -> Result<Token, TokenError> {
    WRAPPED_NATIVE
        .get(&chain_id)
        .cloned()
        .ok_or(TokenError::UnknownChain { chain_id })
}

/// Ether on `chain_id`, wrapping to that chain's WETH
pub fn native_currency(chain_id: ChainId) -> Result<NativeCurrency, TokenError> {
    wrapped_native(chain_id).map(NativeCurrency::ether)
}
