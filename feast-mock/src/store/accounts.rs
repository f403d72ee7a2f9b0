use chrono::Utc;
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Address, AddressCreate, AddressUpdate, PasswordChange, PaymentKind, PaymentMethod,
    PaymentMethodCreate, ProfileUpdate, RegisterRequest, Role, User, mask_card_number,
};
use shared::util::prefixed_id;

use super::{MockStore, UserRecord, user_not_found};

impl MockStore {
    /// Check an e-mail/password pair
    ///
    /// Unknown e-mail and wrong password both yield `InvalidCredentials`.
    pub fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        let users = self.users.read();
        let record = users
            .iter()
            .find(|r| r.user.email.eq_ignore_ascii_case(email.trim()) && r.password == password)
            .ok_or_else(AppError::invalid_credentials)?;
        if !record.user.is_active {
            return Err(AppError::new(ErrorCode::AccountDisabled));
        }
        Ok(record.user.clone())
    }

    pub fn user(&self, id: &str) -> AppResult<User> {
        self.users
            .read()
            .iter()
            .find(|r| r.user.id == id)
            .map(|r| r.user.clone())
            .ok_or_else(|| user_not_found(id))
    }

    pub fn users(&self) -> Vec<User> {
        self.users.read().iter().map(|r| r.user.clone()).collect()
    }

    /// Create a customer account
    pub fn register(&self, request: RegisterRequest) -> AppResult<User> {
        let mut users = self.users.write();
        let email = request.email.trim().to_string();
        if users.iter().any(|r| r.user.email.eq_ignore_ascii_case(&email)) {
            return Err(AppError::with_message(ErrorCode::AlreadyExists, "Email already exists")
                .with_detail("email", email));
        }

        let user = User {
            id: prefixed_id("user"),
            name: request.name.trim().to_string(),
            email,
            phone: request.phone.unwrap_or_default(),
            role: Role::Customer,
            profile_image: None,
            is_active: true,
            restaurant_id: None,
            wallet_balance: Decimal::ZERO,
            loyalty_points: 0,
            created_at: Utc::now(),
        };
        users.push(UserRecord {
            user: user.clone(),
            password: request.password,
        });
        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    pub fn set_user_active(&self, id: &str, is_active: bool) -> AppResult<User> {
        let mut users = self.users.write();
        let record = users
            .iter_mut()
            .find(|r| r.user.id == id)
            .ok_or_else(|| user_not_found(id))?;
        record.user.is_active = is_active;
        Ok(record.user.clone())
    }

    /// Change name, phone or picture; e-mail and role stay as they are
    pub fn update_profile(&self, id: &str, update: ProfileUpdate) -> AppResult<User> {
        let mut users = self.users.write();
        let record = users
            .iter_mut()
            .find(|r| r.user.id == id)
            .ok_or_else(|| user_not_found(id))?;
        record.user.apply(update);
        Ok(record.user.clone())
    }

    /// Replace a password after checking the current one
    pub fn change_password(&self, id: &str, change: &PasswordChange) -> AppResult<()> {
        let mut users = self.users.write();
        let record = users
            .iter_mut()
            .find(|r| r.user.id == id)
            .ok_or_else(|| user_not_found(id))?;
        if record.password != change.old_password {
            return Err(AppError::validation("Current password is incorrect")
                .with_detail("old_password", "does not match"));
        }
        record.password = change.new_password.clone();
        tracing::info!(user_id = %id, "Password changed");
        Ok(())
    }

    // ==================== Addresses ====================

    pub fn addresses_for_user(&self, user_id: &str) -> Vec<Address> {
        self.addresses
            .read()
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn address(&self, id: &str) -> AppResult<Address> {
        self.addresses
            .read()
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| address_not_found(id))
    }

    /// Add an address; a default address demotes the user's other ones
    pub fn create_address(&self, user_id: &str, payload: AddressCreate) -> Address {
        let mut addresses = self.addresses.write();
        let first = !addresses.iter().any(|a| a.user_id == user_id);
        let address = Address {
            id: prefixed_id("ADDR"),
            user_id: user_id.to_string(),
            label: payload.label,
            address_line1: payload.address_line1,
            address_line2: payload.address_line2,
            city: payload.city,
            state: payload.state,
            zip_code: payload.zip_code,
            latitude: payload.latitude,
            longitude: payload.longitude,
            is_default: payload.is_default || first,
            delivery_instructions: payload.delivery_instructions,
            created_at: Utc::now(),
        };
        if address.is_default {
            for other in addresses.iter_mut().filter(|a| a.user_id == user_id) {
                other.is_default = false;
            }
        }
        addresses.push(address.clone());
        address
    }

    pub fn update_address(&self, id: &str, update: AddressUpdate) -> AppResult<Address> {
        let mut addresses = self.addresses.write();
        let index = addresses
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| address_not_found(id))?;

        if update.is_default == Some(true) {
            let owner = addresses[index].user_id.clone();
            for other in addresses.iter_mut().filter(|a| a.user_id == owner) {
                other.is_default = false;
            }
        }
        addresses[index].apply(update);
        Ok(addresses[index].clone())
    }

    pub fn delete_address(&self, id: &str) -> AppResult<()> {
        let mut addresses = self.addresses.write();
        let index = addresses
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| address_not_found(id))?;
        addresses.remove(index);
        Ok(())
    }

    // ==================== Payment methods ====================

    pub fn payment_methods_for_user(&self, user_id: &str) -> Vec<PaymentMethod> {
        self.payment_methods
            .read()
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn payment_method(&self, id: &str) -> AppResult<PaymentMethod> {
        self.payment_methods
            .read()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| payment_method_not_found(id))
    }

    /// Store a display-only payment method; card numbers are masked
    pub fn create_payment_method(&self, user_id: &str, payload: PaymentMethodCreate) -> PaymentMethod {
        let display_number = match payload.kind {
            PaymentKind::CreditCard | PaymentKind::DebitCard => {
                payload.display_number.as_deref().map(mask_card_number)
            }
            _ => payload.display_number,
        };
        let method = PaymentMethod {
            id: prefixed_id("PAY"),
            user_id: user_id.to_string(),
            kind: payload.kind,
            provider: payload.provider,
            display_number,
            holder_name: payload.holder_name,
            expiry_month: payload.expiry_month,
            expiry_year: payload.expiry_year,
            is_default: payload.is_default,
            created_at: Utc::now(),
        };

        let mut methods = self.payment_methods.write();
        if method.is_default {
            for other in methods.iter_mut().filter(|p| p.user_id == user_id) {
                other.is_default = false;
            }
        }
        methods.push(method.clone());
        method
    }

    pub fn delete_payment_method(&self, id: &str) -> AppResult<()> {
        let mut methods = self.payment_methods.write();
        let index = methods
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| payment_method_not_found(id))?;
        methods.remove(index);
        Ok(())
    }
}

fn address_not_found(id: &str) -> AppError {
    AppError::with_message(ErrorCode::AddressNotFound, format!("Address {id} not found"))
        .with_detail("address_id", id)
}

fn payment_method_not_found(id: &str) -> AppError {
    AppError::with_message(
        ErrorCode::PaymentMethodNotFound,
        format!("Payment method {id} not found"),
    )
    .with_detail("payment_method_id", id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::FeeSchedule;

    fn store_with_user() -> MockStore {
        let store = MockStore::new(FeeSchedule::default());
        store
            .register(RegisterRequest {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                password: "secret1".into(),
                phone: None,
            })
            .unwrap();
        store
    }

    fn address(label: &str, is_default: bool) -> AddressCreate {
        AddressCreate {
            label: label.into(),
            address_line1: "1 Main St".into(),
            address_line2: None,
            city: "Pune".into(),
            state: "MH".into(),
            zip_code: "411001".into(),
            latitude: None,
            longitude: None,
            is_default,
            delivery_instructions: None,
        }
    }

    #[test]
    fn test_register_rejects_duplicate_email() {
        let store = store_with_user();
        let err = store
            .register(RegisterRequest {
                name: "Ada Again".into(),
                email: "ADA@example.com".into(),
                password: "secret2".into(),
                phone: None,
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AlreadyExists);
    }

    #[test]
    fn test_authenticate() {
        let store = store_with_user();
        let user = store.authenticate("ada@example.com", "secret1").unwrap();
        assert_eq!(user.role, Role::Customer);

        let err = store.authenticate("ada@example.com", "wrong").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);

        store.set_user_active(&user.id, false).unwrap();
        let err = store.authenticate("ada@example.com", "secret1").unwrap_err();
        assert_eq!(err.code, ErrorCode::AccountDisabled);
    }

    #[test]
    fn test_change_password_checks_current() {
        let store = store_with_user();
        let id = store.authenticate("ada@example.com", "secret1").unwrap().id;

        let wrong = PasswordChange {
            old_password: "nope".into(),
            new_password: "secret2".into(),
        };
        let err = store.change_password(&id, &wrong).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.details.unwrap().contains_key("old_password"));

        let right = PasswordChange {
            old_password: "secret1".into(),
            new_password: "secret2".into(),
        };
        store.change_password(&id, &right).unwrap();
        assert!(store.authenticate("ada@example.com", "secret1").is_err());
        assert!(store.authenticate("ada@example.com", "secret2").is_ok());
    }

    #[test]
    fn test_update_profile() {
        let store = store_with_user();
        let id = store.authenticate("ada@example.com", "secret1").unwrap().id;
        let update = ProfileUpdate {
            phone: Some("+91 98200 00000".into()),
            ..Default::default()
        };
        let user = store.update_profile(&id, update).unwrap();
        assert_eq!(user.phone, "+91 98200 00000");
        assert_eq!(user.name, "Ada");
        assert_eq!(store.user(&id).unwrap().phone, "+91 98200 00000");

        let err = store.update_profile("user_0", ProfileUpdate::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::UserNotFound);
    }

    #[test]
    fn test_single_default_address() {
        let store = MockStore::new(FeeSchedule::default());
        let home = store.create_address("u1", address("Home", false));
        assert!(home.is_default, "first address becomes default");
        let work = store.create_address("u1", address("Work", true));
        let all = store.addresses_for_user("u1");
        assert_eq!(all.iter().filter(|a| a.is_default).count(), 1);
        assert!(all.iter().find(|a| a.id == work.id).unwrap().is_default);

        store
            .update_address(
                &home.id,
                AddressUpdate {
                    is_default: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();
        let all = store.addresses_for_user("u1");
        assert!(all.iter().find(|a| a.id == home.id).unwrap().is_default);
        assert!(!all.iter().find(|a| a.id == work.id).unwrap().is_default);
    }

    #[test]
    fn test_delete_unknown_address() {
        let store = MockStore::new(FeeSchedule::default());
        let err = store.delete_address("ADDR_0").unwrap_err();
        assert_eq!(err.code, ErrorCode::AddressNotFound);
    }

    #[test]
    fn test_card_numbers_are_masked() {
        let store = MockStore::new(FeeSchedule::default());
        let card = store.create_payment_method(
            "u1",
            PaymentMethodCreate {
                kind: PaymentKind::CreditCard,
                provider: "Visa".into(),
                display_number: Some("4111 1111 1111 1234".into()),
                holder_name: Some("Ada".into()),
                expiry_month: Some("12".into()),
                expiry_year: Some("2030".into()),
                is_default: true,
            },
        );
        assert_eq!(card.display_number.as_deref(), Some("**** **** **** 1234"));
        store.delete_payment_method(&card.id).unwrap();
        assert!(store.payment_methods_for_user("u1").is_empty());
    }
}
