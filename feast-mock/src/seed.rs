//! Demo data loaded into a fresh mock store

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use shared::coupon::{Coupon, DiscountType};
use shared::error::{AppError, AppResult};
use shared::models::{
    Address, Notification, NotificationKind, PaymentKind, PaymentMethod, Review, Role,
    Transaction, TransactionKind, User,
};
use shared::order::{
    Actor, CheckoutLine, CheckoutRequest, FeeSchedule, Order, OrderStatus, PaymentChoice,
};

use crate::store::MockStore;

/// Password of every seeded customer and owner
pub const DEMO_PASSWORD: &str = "password123";
pub const ADMIN_PASSWORD: &str = "admin123";

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> AppResult<DateTime<Utc>> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .ok_or_else(|| AppError::internal(format!("invalid seed timestamp {y}-{m}-{d}")))
}

fn money(units: i64, cents: u32) -> Decimal {
    Decimal::new(units * 100 + i64::from(cents), 2)
}

struct SeedUser {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    role: Role,
    restaurant_id: Option<&'static str>,
    is_active: bool,
    wallet: Decimal,
    points: i64,
    avatar: u32,
}

fn users() -> Vec<SeedUser> {
    let customer = |id, name, email, phone, wallet, points, avatar| SeedUser {
        id,
        name,
        email,
        phone,
        role: Role::Customer,
        restaurant_id: None,
        is_active: true,
        wallet,
        points,
        avatar,
    };
    vec![
        customer("user_001", "John Doe", "john.doe@example.com", "+1 (555) 123-4567", money(125, 50), 450, 12),
        customer("user_002", "Jane Smith", "jane.smith@example.com", "+1 (555) 234-5678", money(78, 25), 320, 5),
        customer("user_003", "Mike Wilson", "mike.wilson@example.com", "+1 (555) 345-6789", money(250, 0), 890, 33),
        customer("user_004", "Sarah Johnson", "sarah.johnson@example.com", "+1 (555) 456-7890", Decimal::ZERO, 150, 9),
        SeedUser {
            is_active: false,
            ..customer("user_005", "David Brown", "david.brown@example.com", "+1 (555) 567-8901", money(50, 0), 210, 14)
        },
        SeedUser {
            id: "owner_001",
            name: "Tony Romano",
            email: "owner.pizza@example.com",
            phone: "+1 (555) 111-2222",
            role: Role::Owner,
            restaurant_id: Some("1"),
            is_active: true,
            wallet: Decimal::ZERO,
            points: 0,
            avatar: 60,
        },
        SeedUser {
            id: "admin_001",
            name: "Admin User",
            email: "admin@foodapp.com",
            phone: "+1 (555) 000-0000",
            role: Role::Admin,
            restaurant_id: None,
            is_active: true,
            wallet: Decimal::ZERO,
            points: 0,
            avatar: 68,
        },
    ]
}

fn coupon(
    id: &str,
    code: &str,
    description: &str,
    discount_type: DiscountType,
    value: Decimal,
    min_order: Decimal,
    max_discount: Option<Decimal>,
    (usage_limit, used_count): (u32, u32),
    expires_on: Option<NaiveDate>,
) -> Coupon {
    Coupon {
        id: id.to_string(),
        code: code.to_string(),
        description: description.to_string(),
        discount_type,
        discount_value: value,
        min_order_amount: min_order,
        max_discount,
        new_users_only: false,
        active: true,
        valid_from: None,
        expires_on,
        usage_limit: Some(usage_limit),
        used_count,
    }
}

fn coupons() -> Vec<Coupon> {
    let expiry = NaiveDate::from_ymd_opt(2030, 12, 31);
    let whole = |v: i64| Decimal::new(v, 0);
    vec![
        coupon("COUP_001", "SAVE20", "Get 20% off on orders above $30", DiscountType::Percentage, whole(20), whole(30), Some(whole(15)), (1000, 245), expiry),
        coupon("COUP_002", "FLAT10", "Flat $10 off on orders above $20", DiscountType::Fixed, whole(10), whole(20), None, (500, 156), expiry),
        Coupon {
            new_users_only: true,
            ..coupon("COUP_003", "FIRST50", "First order special - 50% off!", DiscountType::Percentage, whole(50), whole(25), Some(whole(25)), (5000, 1234), expiry)
        },
        coupon("COUP_004", "WEEKEND15", "Weekend special - 15% off", DiscountType::Percentage, whole(15), whole(35), Some(whole(20)), (2000, 567), expiry),
        coupon("COUP_005", "LUNCH5", "Lunch deal - $5 off on orders above $15", DiscountType::Fixed, whole(5), whole(15), None, (3000, 890), expiry),
        coupon("COUP_006", "FREESHIP", "Free delivery on orders above $25", DiscountType::FreeDelivery, Decimal::ZERO, whole(25), None, (10000, 3456), expiry),
    ]
}

fn line(id: &str, name: &str, price: Decimal, quantity: u32, is_veg: bool) -> CheckoutLine {
    CheckoutLine {
        menu_item_id: id.to_string(),
        name: name.to_string(),
        price,
        quantity,
        image: None,
        is_veg,
    }
}

struct SeedOrder {
    id: &'static str,
    user_id: &'static str,
    restaurant: (&'static str, &'static str),
    items: Vec<CheckoutLine>,
    address: &'static str,
    payment: PaymentChoice,
    placed_at: DateTime<Utc>,
    /// Status changes applied after placement, in order
    history: Vec<(OrderStatus, DateTime<Utc>)>,
}

fn orders() -> AppResult<Vec<SeedOrder>> {
    Ok(vec![
        SeedOrder {
            id: "ORD-2024-001",
            user_id: "user_001",
            restaurant: ("1", "Pizza Palace"),
            items: vec![
                line("1", "Margherita Pizza", money(12, 99), 2, true),
                line("3", "Garlic Bread", money(9, 99), 1, true),
            ],
            address: "742 Evergreen Terrace, Apartment 4B, Manhattan, NY 10001",
            payment: PaymentChoice::Card,
            placed_at: at(2024, 12, 7, 11, 45)?,
            history: vec![
                (OrderStatus::Confirmed, at(2024, 12, 7, 11, 50)?),
                (OrderStatus::Preparing, at(2024, 12, 7, 12, 0)?),
                (OrderStatus::OutForDelivery, at(2024, 12, 7, 12, 25)?),
                (OrderStatus::Delivered, at(2024, 12, 7, 12, 42)?),
            ],
        },
        SeedOrder {
            id: "ORD-2024-002",
            user_id: "user_002",
            restaurant: ("2", "Burger Haven"),
            items: vec![
                line("5", "Classic Burger", money(9, 99), 2, false),
                line("7", "Loaded Fries", money(5, 49), 1, true),
                line("8", "Chocolate Shake", money(4, 99), 2, true),
            ],
            address: "1428 Elm Street, Springfield, IL 62701",
            payment: PaymentChoice::Upi,
            placed_at: at(2024, 12, 8, 12, 20)?,
            history: vec![
                (OrderStatus::Confirmed, at(2024, 12, 8, 12, 22)?),
                (OrderStatus::Preparing, at(2024, 12, 8, 12, 30)?),
                (OrderStatus::OutForDelivery, at(2024, 12, 8, 12, 55)?),
            ],
        },
        SeedOrder {
            id: "ORD-2024-003",
            user_id: "user_001",
            restaurant: ("3", "Spice Route"),
            items: vec![
                line("9", "Butter Chicken", money(15, 99), 1, false),
                line("12", "Garlic Naan", money(2, 99), 3, true),
            ],
            address: "350 Fifth Avenue, Floor 34, Manhattan, NY 10118",
            payment: PaymentChoice::Cash,
            placed_at: at(2024, 12, 9, 19, 5)?,
            history: vec![(OrderStatus::Cancelled, at(2024, 12, 9, 19, 12)?)],
        },
        SeedOrder {
            id: "ORD-2024-004",
            user_id: "user_002",
            restaurant: ("1", "Pizza Palace"),
            items: vec![line("2", "Pepperoni Pizza", money(14, 99), 1, false)],
            address: "1428 Elm Street, Springfield, IL 62701",
            payment: PaymentChoice::Cash,
            placed_at: at(2024, 12, 10, 13, 15)?,
            history: Vec::new(),
        },
    ])
}

fn addresses() -> AppResult<Vec<Address>> {
    let created = at(2024, 1, 15, 10, 30)?;
    let address = |id: &str, user: &str, label: &str, line1: &str, line2: Option<&str>, city: &str, state: &str, zip: &str, is_default: bool, notes: Option<&str>| Address {
        id: id.to_string(),
        user_id: user.to_string(),
        label: label.to_string(),
        address_line1: line1.to_string(),
        address_line2: line2.map(str::to_string),
        city: city.to_string(),
        state: state.to_string(),
        zip_code: zip.to_string(),
        latitude: None,
        longitude: None,
        is_default,
        delivery_instructions: notes.map(str::to_string),
        created_at: created,
    };
    Ok(vec![
        address("ADDR_001", "user_001", "Home", "742 Evergreen Terrace", Some("Apartment 4B"), "Manhattan", "NY", "10001", true, Some("Ring doorbell twice, leave at door")),
        address("ADDR_002", "user_001", "Office", "350 Fifth Avenue", Some("Floor 34"), "Manhattan", "NY", "10118", false, Some("Reception desk")),
        address("ADDR_003", "user_002", "Home", "1428 Elm Street", None, "Springfield", "IL", "62701", true, None),
    ])
}

fn payment_methods() -> AppResult<Vec<PaymentMethod>> {
    let created = at(2024, 1, 15, 10, 35)?;
    let card = |id: &str, user: &str, kind, provider: &str, last4: &str, holder: &str, month: &str, year: &str, is_default| PaymentMethod {
        id: id.to_string(),
        user_id: user.to_string(),
        kind,
        provider: provider.to_string(),
        display_number: Some(format!("**** **** **** {last4}")),
        holder_name: Some(holder.to_string()),
        expiry_month: Some(month.to_string()),
        expiry_year: Some(year.to_string()),
        is_default,
        created_at: created,
    };
    Ok(vec![
        card("PAY_001", "user_001", PaymentKind::CreditCard, "Visa", "1234", "John Doe", "12", "2028", true),
        card("PAY_002", "user_001", PaymentKind::DebitCard, "Mastercard", "5678", "John Doe", "08", "2027", false),
        PaymentMethod {
            id: "PAY_003".to_string(),
            user_id: "user_002".to_string(),
            kind: PaymentKind::Upi,
            provider: "Google Pay".to_string(),
            display_number: Some("jane@okaxis".to_string()),
            holder_name: None,
            expiry_month: None,
            expiry_year: None,
            is_default: true,
            created_at: created,
        },
    ])
}

fn reviews() -> AppResult<Vec<Review>> {
    Ok(vec![
        Review {
            id: "REV_001".into(),
            user_id: "user_001".into(),
            user_name: "John Doe".into(),
            restaurant_id: "1".into(),
            order_id: Some("ORD-2024-001".into()),
            rating: 5,
            comment: "Amazing pizza! The crust was perfectly crispy and the toppings were fresh."
                .into(),
            food_rating: Some(5),
            delivery_rating: Some(4),
            created_at: at(2024, 12, 7, 13, 0)?,
        },
        Review {
            id: "REV_002".into(),
            user_id: "user_003".into(),
            user_name: "Mike Wilson".into(),
            restaurant_id: "1".into(),
            order_id: None,
            rating: 4,
            comment: "Solid margherita, delivery was a little slow.".into(),
            food_rating: Some(5),
            delivery_rating: Some(3),
            created_at: at(2024, 12, 5, 20, 15)?,
        },
    ])
}

fn notifications() -> AppResult<Vec<Notification>> {
    Ok(vec![Notification {
        id: "NOTIF_PROMO_001".into(),
        user_id: "user_003".into(),
        kind: NotificationKind::Promotion,
        title: "Weekend Special!".into(),
        message: "Use code WEEKEND15 for 15% off your order this weekend.".into(),
        order_id: None,
        is_read: false,
        created_at: at(2024, 12, 6, 9, 0)?,
    }])
}

fn wallet_top_ups() -> AppResult<Vec<Transaction>> {
    Ok(vec![Transaction {
        id: "TXN_TOPUP_001".into(),
        user_id: "user_001".into(),
        order_id: None,
        kind: TransactionKind::WalletTopup,
        amount: money(100, 0),
        payment_method: "Card".into(),
        transaction_ref: "TXN_REF_20241201_TOPUP".into(),
        created_at: at(2024, 12, 1, 10, 0)?,
    }])
}

fn favorites() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        ("user_001", vec!["1", "3", "6"]),
        ("user_002", vec!["2", "7", "8"]),
        ("user_003", vec!["3", "8", "1"]),
        ("user_004", vec!["5", "6", "3", "8"]),
    ]
}

impl MockStore {
    /// A store populated with the demo users, orders, coupons and account data
    pub fn seeded(fees: FeeSchedule) -> AppResult<Self> {
        let store = Self::new(fees);

        for u in users() {
            let password = if u.role == Role::Admin {
                ADMIN_PASSWORD
            } else {
                DEMO_PASSWORD
            };
            store.insert_user(
                User {
                    id: u.id.into(),
                    name: u.name.into(),
                    email: u.email.into(),
                    phone: u.phone.into(),
                    role: u.role,
                    profile_image: Some(format!("https://i.pravatar.cc/150?img={}", u.avatar)),
                    is_active: u.is_active,
                    restaurant_id: u.restaurant_id.map(str::to_string),
                    wallet_balance: u.wallet,
                    loyalty_points: u.points,
                    created_at: at(2024, 1, 15, 10, 30)?,
                },
                password,
            );
        }

        for c in coupons() {
            store.insert_coupon(c);
        }

        for seed in orders()? {
            let request = CheckoutRequest {
                request_id: None,
                user_id: seed.user_id.into(),
                restaurant_id: seed.restaurant.0.into(),
                restaurant_name: Some(seed.restaurant.1.into()),
                items: seed.items,
                delivery_address: seed.address.into(),
                delivery_instructions: None,
                payment_method: seed.payment,
                coupon_code: None,
            };
            let mut order = Order::place(seed.id, &request, store.fees(), Decimal::ZERO, seed.placed_at)?;
            for (status, when) in seed.history {
                order.update_status(status, Actor::System, when)?;
                store.insert_notification(Notification {
                    id: format!("NOTIF_{}_{}", seed.id, status.as_str()),
                    user_id: order.user_id.clone(),
                    kind: NotificationKind::OrderUpdate,
                    title: status.headline().into(),
                    message: format!("Your order from {} is now {}", order.restaurant_name, status.as_str().replace('_', " ")),
                    order_id: Some(order.id.clone()),
                    is_read: status == OrderStatus::Delivered,
                    created_at: when,
                });
            }
            if order.payment_method.is_prepaid() {
                store.insert_transaction(Transaction {
                    id: format!("TXN_{}", seed.id),
                    user_id: order.user_id.clone(),
                    order_id: Some(order.id.clone()),
                    kind: TransactionKind::Payment,
                    amount: order.total_amount,
                    payment_method: order.payment_method.label().into(),
                    transaction_ref: format!("TXN_REF_{}", seed.placed_at.format("%Y%m%d%H%M")),
                    created_at: seed.placed_at,
                });
            }
            store.insert_order(order);
        }
        for t in wallet_top_ups()? {
            store.insert_transaction(t);
        }

        for a in addresses()? {
            store.insert_address(a);
        }
        for p in payment_methods()? {
            store.insert_payment_method(p);
        }
        for r in reviews()? {
            store.insert_review(r);
        }
        for n in notifications()? {
            store.insert_notification(n);
        }
        for (user, restaurants) in favorites() {
            for restaurant in restaurants {
                store.add_favorite(user, restaurant);
            }
        }

        Ok(store)
    }
}
