//! Input validation for sales channel operations

use crate::contract::{CreateSalesChannelInput, SalesChannelError, UpdateSalesChannelInput};

/// Validate a sales channel id supplied by a caller
pub fn validate_id(id: &str) -> Result<(), SalesChannelError> {
    if id.trim().is_empty() {
        return Err(SalesChannelError::invalid("sales channel id cannot be empty"));
    }
    Ok(())
}

/// Validate a sales channel name: non-blank and at most `max_len` characters
pub fn validate_name(name: &str, max_len: usize) -> Result<(), SalesChannelError> {
    if name.trim().is_empty() {
        return Err(SalesChannelError::invalid("sales channel name cannot be empty"));
    }

    let len = name.chars().count();
    if len > max_len {
        return Err(SalesChannelError::invalid(format!(
            "sales channel name is {} characters long, maximum is {}",
            len, max_len
        )));
    }

    Ok(())
}

pub fn validate_create(
    input: &CreateSalesChannelInput,
    max_name_len: usize,
) -> Result<(), SalesChannelError> {
    validate_name(&input.name, max_name_len)
}

pub fn validate_update(
    input: &UpdateSalesChannelInput,
    max_name_len: usize,
) -> Result<(), SalesChannelError> {
    match &input.name {
        Some(name) => validate_name(name, max_name_len),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::ErrorKind;

    #[test]
    fn test_validate_id() {
        assert!(validate_id("sc_1").is_ok());
        assert_eq!(validate_id("").unwrap_err().kind(), ErrorKind::InvalidData);
        assert_eq!(validate_id("  ").unwrap_err().kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn test_validate_name_length_counts_chars() {
        assert!(validate_name("Web", 3).is_ok());
        assert!(validate_name("Магазин", 7).is_ok());
        assert!(validate_name("Webshop", 3).is_err());
        assert!(validate_name("", 3).is_err());
    }

    #[test]
    fn test_update_without_name_is_valid() {
        let input = UpdateSalesChannelInput::default().active(Some(false));
        assert!(validate_update(&input, 1).is_ok());

        let input = UpdateSalesChannelInput::default().name(" ");
        assert!(validate_update(&input, 10).is_err());
    }
}
