use crate::entities::users::Role;
use crate::error::ServiceError;

const MAX_LIMIT: u64 = 100;

pub fn validate_required(field: &str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::invariant(format!("{field} is required")));
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), ServiceError> {
    validate_required("username", username)?;

    if username.len() > 50 {
        return Err(ServiceError::invariant(
            "username must be 50 characters or less",
        ));
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_')
    {
        return Err(ServiceError::invariant(
            "username can only contain letters, digits, dots, hyphens, and underscores",
        ));
    }

    Ok(())
}

pub fn validate_page(page: Option<u64>) -> Result<u64, ServiceError> {
    let page = page.unwrap_or(1);
    if page == 0 {
        return Err(ServiceError::invariant("page must be 1 or greater"));
    }
    Ok(page)
}

pub fn validate_limit(limit: Option<u64>) -> Result<u64, ServiceError> {
    let limit = limit.unwrap_or(10);
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(ServiceError::invariant(format!(
            "limit must be between 1 and {MAX_LIMIT}"
        )));
    }
    Ok(limit)
}

pub fn parse_role(role: Option<&str>) -> Result<Option<Role>, ServiceError> {
    match role {
        None => Ok(None),
        Some("admin") => Ok(Some(Role::Admin)),
        Some("staff") => Ok(Some(Role::Staff)),
        Some(other) => Err(ServiceError::invariant(format!(
            "unknown role: {other}. Role must be admin or staff"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert!(validate_required("name", "Alice").is_ok());
        assert!(validate_required("name", "").is_err());
        assert!(validate_required("name", "   ").is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice.w-01_").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username(&"a".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_page() {
        assert_eq!(validate_page(None).unwrap(), 1);
        assert_eq!(validate_page(Some(3)).unwrap(), 3);
        assert!(validate_page(Some(0)).is_err());
    }

    #[test]
    fn test_validate_limit() {
        assert_eq!(validate_limit(None).unwrap(), 10);
        assert_eq!(validate_limit(Some(100)).unwrap(), 100);
        assert!(validate_limit(Some(0)).is_err());
        assert!(validate_limit(Some(101)).is_err());
    }

    #[test]
    fn test_parse_role() {
        assert_eq!(parse_role(None).unwrap(), None);
        assert_eq!(parse_role(Some("admin")).unwrap(), Some(Role::Admin));
        assert_eq!(parse_role(Some("staff")).unwrap(), Some(Role::Staff));
        assert!(parse_role(Some("root")).is_err());
    }
}
