//! Validation helpers for swap settings

use rust_decimal::Decimal;

use super::ServiceResult;
use super::error::ServiceError;
use super::types::TokenSelection;

/// Ensure the swap amount is strictly positive
pub fn validate_amount(amount: Decimal) -> ServiceResult<()> {
    if amount <= Decimal::ZERO {
        return Err(ServiceError::InvalidAmount(format!(
            "swap amount must be positive, got {amount}"
        )));
    }
    Ok(())
}

/// Ensure the slippage tolerance is a fraction in `[0, 1)`
///
/// # Arguments
/// * `slippage` - Tolerance as a fraction (e.g. `0.01` for 1%)
pub fn validate_slippage(slippage: Decimal) -> ServiceResult<()> {
    if slippage < Decimal::ZERO || slippage >= Decimal::ONE {
        return Err(ServiceError::InvalidSlippage(format!(
            "expected a fraction in [0, 1), got {slippage}"
        )));
    }
    Ok(())
}

/// Pick the destination token among those reachable from the source token
///
/// # Arguments
/// * `reachable` - Token ids as listed by the quoting service
/// * `selection` - A token id that must be in `reachable`, or an index into it
///
/// # Returns
/// The chosen token id
pub fn select_token_y(reachable: &[String], selection: &TokenSelection) -> ServiceResult<String> {
    match selection {
        TokenSelection::Id(id) => reachable
            .iter()
            .find(|token| *token == id)
            .cloned()
            .ok_or_else(|| ServiceError::TokenNotFound(id.clone())),
        TokenSelection::Index(index) => reachable.get(*index).cloned().ok_or_else(|| {
            ServiceError::TokenNotFound(format!(
                "index {index} out of range, {} tokens reachable",
                reachable.len()
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn tokens() -> Vec<String> {
        vec![
            "token-stx".to_string(),
            "token-alex".to_string(),
            "token-sbtc".to_string(),
        ]
    }

    #[test]
    fn test_validate_amount_should_work() {
        assert!(validate_amount(Decimal::from_str("0.01").unwrap()).is_ok());
        assert!(matches!(
            validate_amount(Decimal::ZERO),
            Err(ServiceError::InvalidAmount(_))
        ));
        assert!(validate_amount(Decimal::from(-1)).is_err());
    }

    #[test]
    fn test_validate_slippage_should_work() {
        assert!(validate_slippage(Decimal::ZERO).is_ok());
        assert!(validate_slippage(Decimal::from_str("0.01").unwrap()).is_ok());
        assert!(matches!(
            validate_slippage(Decimal::ONE),
            Err(ServiceError::InvalidSlippage(_))
        ));
        assert!(validate_slippage(Decimal::from_str("-0.5").unwrap()).is_err());
    }

    #[test]
    fn test_select_token_y_by_index_should_work() {
        assert_eq!(
            select_token_y(&tokens(), &TokenSelection::Index(2)).unwrap(),
            "token-sbtc"
        );
        assert!(matches!(
            select_token_y(&tokens(), &TokenSelection::Index(11)),
            Err(ServiceError::TokenNotFound(_))
        ));
    }

    #[test]
    fn test_select_token_y_by_id_should_work() {
        assert_eq!(
            select_token_y(&tokens(), &TokenSelection::Id("token-alex".to_string())).unwrap(),
            "token-alex"
        );
        assert!(matches!(
            select_token_y(&tokens(), &TokenSelection::Id("token-doge".to_string())),
            Err(ServiceError::TokenNotFound(_))
        ));
    }
}
