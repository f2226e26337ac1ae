//! Value objects describing token store requests.

pub mod requests;

pub use requests::{
    CreateToken, DeleteAllTokens, DeleteToken, GetToken, RefreshToken, TokenLookup, UpdateToken,
};
