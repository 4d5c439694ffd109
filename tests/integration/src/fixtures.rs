//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use estate_client::{Credentials, ImageFile, NewComment, NewOffer, NewUser};
use estate_core::{City, Goods, HousingType, UserType};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Bytes posted as a PNG image
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nintegration-image";

pub fn png(name: &str) -> ImageFile {
    ImageFile::png(name, PNG_BYTES.to_vec())
}

/// Sign-up form with a fresh email
pub fn unique_user() -> NewUser {
    let suffix = unique_suffix();
    NewUser {
        name: format!("Tester{suffix}"),
        email: format!("test{suffix}@example.com"),
        password: "secret1".to_string(),
        user_type: UserType::Regular,
        avatar: None,
    }
}

pub fn credentials(user: &NewUser) -> Credentials {
    Credentials {
        email: user.email.clone(),
        password: user.password.clone(),
    }
}

/// Listing form without uploads
pub fn new_offer(city: City, is_premium: bool) -> NewOffer {
    NewOffer {
        title: format!("Quiet flat number {}", unique_suffix()),
        description: "Quiet flat with a view of the park and a large kitchen".to_string(),
        city,
        preview_image: "preview.jpg".to_string(),
        images: (1..=6).map(|i| format!("photo-{i}.jpg")).collect(),
        is_premium,
        housing_type: HousingType::Apartment,
        rooms: 2,
        guests: 4,
        price: 320,
        goods: vec![Goods::Breakfast, Goods::Washer],
        location: None,
        preview_upload: None,
        image_uploads: Vec::new(),
    }
}

pub fn comment(text: &str, rating: u8) -> NewComment {
    NewComment {
        text: text.to_string(),
        rating,
    }
}
