use super::*;

#[test]
fn login_response_converts_to_session() {
    let resp: LoginResponse =
        serde_json::from_str(r#"{"access":"a1","refresh":"r1","role":"customer"}"#).unwrap();
    assert_eq!(
        resp.into_session(),
        Some(Session {
            access_token: "a1".to_owned(),
            refresh_token: "r1".to_owned(),
            role: "customer".to_owned(),
        })
    );
}

#[test]
fn login_response_accepts_camel_case_aliases() {
    let resp: LoginResponse =
        serde_json::from_str(r#"{"accessToken":"a1","refreshToken":"r1"}"#).unwrap();
    let session = resp.into_session().unwrap();
    assert_eq!(session.access_token, "a1");
    assert_eq!(session.refresh_token, "r1");
    assert_eq!(session.role, "");
}

#[test]
fn login_response_without_access_is_not_a_session() {
    let resp: LoginResponse = serde_json::from_str(r#"{"refresh":"r1","role":"admin"}"#).unwrap();
    assert_eq!(resp.into_session(), None);
    let empty: LoginResponse = serde_json::from_str(r#"{"access":""}"#).unwrap();
    assert_eq!(empty.into_session(), None);
}

#[test]
fn blog_page_reads_paginated_shape() {
    let page: BlogPage = serde_json::from_str(
        r#"{"results":[{"slug":"ebc","title":"EBC Guide"}],"count":12,"next":"http://x/?page=2","previous":null}"#,
    )
    .unwrap();
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.count, 12);
    assert!(page.has_next());
    assert!(!page.has_previous());
}

#[test]
fn blog_page_accepts_bare_array() {
    let page: BlogPage =
        serde_json::from_str(r#"[{"slug":"a","title":"A"},{"slug":"b","title":"B"}]"#).unwrap();
    assert_eq!(page.count, 2);
    assert_eq!(page.next, None);
}

const LIST_ITEM: &str = r#"{
    "id": 7, "status": "published", "type": "article", "contentType": "guide",
    "slug": "ebc-permits", "title": "EBC Permits", "subtitle": "",
    "excerpt": "What to carry.", "metaTitle": "", "metaDescription": "",
    "language": "en", "category": "Guides", "categorySlug": "guides",
    "region": "Everest", "regionSlug": "everest",
    "author": {"name": "Pasang", "slug": "pasang", "role": "Guide", "avatarUrl": "", "description": ""},
    "publishDate": "2025-03-01T08:00:00Z", "updatedAt": "2025-03-02T08:00:00Z",
    "readTime": 6, "difficulty": "moderate", "canonicalUrl": "",
    "image": "https://cdn.example/legacy.jpg",
    "featuredImage": {"url": "https://cdn.example/ebc.jpg", "alt": "Khumbu valley"},
    "imageFile": null, "featuredImageFile": null,
    "tags": ["permits", "everest"],
    "engagement": {"views": 120, "likes": 4, "shares": 1},
    "flags": {"isFeatured": true, "allowComments": true, "isLiked": false, "isBookmarked": false}
}"#;

#[test]
fn blog_page_reads_list_serializer_items() {
    let body = format!(r#"{{"count":1,"next":null,"previous":null,"results":[{LIST_ITEM}]}}"#);
    let page: BlogPage = serde_json::from_str(&body).unwrap();
    let post = &page.results[0];
    assert_eq!(post.slug, "ebc-permits");
    assert_eq!(post.category.as_deref(), Some("Guides"));
    assert_eq!(post.category_slug.as_deref(), Some("guides"));
    assert_eq!(post.author.as_deref(), Some("Pasang"));
    assert_eq!(post.published_at.as_deref(), Some("2025-03-01T08:00:00Z"));
    assert_eq!(post.read_time, Some(6));
    assert_eq!(post.views, 120);
    assert_eq!(post.subtitle, None);
    assert_eq!(post.summary(), Some("What to carry."));
    assert_eq!(post.tags, vec!["permits".to_owned(), "everest".to_owned()]);
    assert_eq!(
        post.featured_image,
        Some(FeaturedImage {
            url: "https://cdn.example/ebc.jpg".to_owned(),
            alt: Some("Khumbu valley".to_owned()),
            caption: None,
        })
    );
}

#[test]
fn blog_post_reads_detail_serializer_body() {
    let post: BlogPost = serde_json::from_str(
        r#"{
            "id": 7, "slug": "ebc-permits", "title": "EBC Permits",
            "description": "Long description.", "excerpt": "Short excerpt.",
            "category": "", "categorySlug": "", "author": null,
            "publishDate": "2025-03-01T08:00:00Z", "readTime": 0,
            "image": "", "featuredImage": {}, "imageFile": "https://cdn.example/file.jpg",
            "featuredImageFile": null,
            "taxonomies": {"tags": [], "focusKeyword": "permits"},
            "toc": [], "shareLinks": {}, "seo": {}, "schema": {},
            "content": {"format": "rich_blocks_v1", "vlog": null, "blocks": [
                {"type": "heading", "level": 2, "text": "TIMS card"},
                {"type": "paragraph", "spans": [{"type": "text", "text": "Buy it in Kathmandu."}]}
            ]},
            "engagement": {"views": 3, "likes": 0, "shares": 0},
            "flags": {"isFeatured": false}
        }"#,
    )
    .unwrap();
    assert_eq!(post.summary(), Some("Short excerpt."));
    assert_eq!(post.description.as_deref(), Some("Long description."));
    assert_eq!(post.category, None);
    assert_eq!(post.author, None);
    assert_eq!(post.read_time, None);
    assert_eq!(post.views, 3);
    assert_eq!(post.content.blocks.len(), 2);
    let image = post.featured_image.unwrap();
    assert_eq!(image.url, "https://cdn.example/file.jpg");
    assert_eq!(image.alt.as_deref(), Some("EBC Permits"));
}

#[test]
fn blog_post_image_accepts_plain_string() {
    let post: BlogPost =
        serde_json::from_str(r#"{"slug":"b","title":"B","category":{"name":"Culture"},"image":"/img.jpg"}"#).unwrap();
    assert_eq!(post.category.as_deref(), Some("Culture"));
    assert_eq!(post.featured_image.map(|i| i.url).as_deref(), Some("/img.jpg"));
}

#[test]
fn blog_post_body_falls_back_to_description() {
    let post: BlogPost =
        serde_json::from_str(r#"{"slug":"b","title":"B","description":"One.\n\nTwo.","content":{"blocks":[]}}"#)
            .unwrap();
    assert!(post.content.is_empty());
    assert_eq!(post.body().blocks.len(), 2);
    assert_eq!(post.summary(), Some("One.\n\nTwo."));
}

#[test]
fn trek_list_accepts_every_wrapper() {
    let trek = r#"{"slug":"ebc","name":"Everest Base Camp","region":"Everest","duration":"14 days","price":"1450.00"}"#;
    for body in [
        format!("[{trek}]"),
        format!(r#"{{"results":[{trek}]}}"#),
        format!(r#"{{"data":[{trek}]}}"#),
        format!(r#"{{"treks":[{trek}]}}"#),
    ] {
        let TrekList(treks) = serde_json::from_str(&body).unwrap();
        assert_eq!(treks.len(), 1, "{body}");
        assert_eq!(treks[0].duration, Some(14.0));
        assert_eq!(treks[0].price, Some(1450.0));
    }
}

#[test]
fn trek_region_object_uses_name() {
    let trek: Trek = serde_json::from_str(
        r#"{"slug":"abc","title":"Annapurna Circuit","region":{"name":"Annapurna"},"duration":18}"#,
    )
    .unwrap();
    assert_eq!(trek.name, "Annapurna Circuit");
    assert_eq!(trek.region.as_deref(), Some("Annapurna"));
    assert_eq!(trek.duration, Some(18.0));
}

#[test]
fn booking_detail_formats_total_and_lead_name() {
    let booking: BookingDetail = serde_json::from_str(
        r#"{"booking_ref":"EVT-42","total_amount":"1450.5","currency":"usd","status":"paid","lead_first_name":"Asha","lead_last_name":" "}"#,
    )
    .unwrap();
    assert_eq!(booking.party_size, 1);
    assert_eq!(booking.formatted_total().as_deref(), Some("USD 1450.50"));
    assert_eq!(booking.lead_name().as_deref(), Some("Asha"));
}

#[test]
fn booking_detail_without_amount_has_no_total() {
    let booking: BookingDetail = serde_json::from_str(r#"{"booking_ref":"EVT-1"}"#).unwrap();
    assert_eq!(booking.formatted_total(), None);
    assert_eq!(booking.lead_name(), None);
}

#[test]
fn itinerary_accepts_string_coordinates_and_wrappers() {
    let bare: Itinerary = serde_json::from_str(
        r#"[{"day":1,"title":"Lukla","latitude":"27.6881","longitude":86.7314},
            {"day":2,"place_name":"Phakding","latitude":27.7400,"longitude":86.7120}]"#,
    )
    .unwrap();
    assert_eq!(bare.waypoints(), vec![LatLng::new(27.6881, 86.7314), LatLng::new(27.74, 86.712)]);

    let wrapped: Itinerary = serde_json::from_str(r#"{"results":[{"day":1}]}"#).unwrap();
    assert_eq!(wrapped.0.len(), 1);
    assert!(wrapped.waypoints().is_empty());
}

#[test]
fn itinerary_rejects_positions_outside_nepal() {
    let day = ItineraryDay { latitude: Some(0.0), longitude: Some(0.0), ..ItineraryDay::default() };
    assert_eq!(day.position(), None);
}

#[test]
fn itinerary_day_labels() {
    let titled = ItineraryDay { title: Some("Namche Bazaar".into()), ..ItineraryDay::default() };
    assert_eq!(titled.label(0), "Namche Bazaar");
    let placed = ItineraryDay { place_name: Some("Dingboche".into()), ..ItineraryDay::default() };
    assert_eq!(placed.label(3), "Dingboche");
    let numbered = ItineraryDay { day: Some(5), ..ItineraryDay::default() };
    assert_eq!(numbered.label(0), "Day 5");
    assert_eq!(ItineraryDay::default().label(2), "Day 3");
}

#[test]
fn account_notice_reads_message_or_detail() {
    let sent: AccountNotice = serde_json::from_str(r#"{"message":"OTP sent to your email."}"#).unwrap();
    assert_eq!(sent.message.as_deref(), Some("OTP sent to your email."));
    let detail: AccountNotice = serde_json::from_str(r#"{"message":" ","detail":"Reset code sent."}"#).unwrap();
    assert_eq!(detail.message.as_deref(), Some("Reset code sent."));
    let bare: AccountNotice = serde_json::from_str(r#"{"email":"a@b.com"}"#).unwrap();
    assert_eq!(bare.message, None);
}

#[test]
fn registration_serializes_backend_field_names() {
    let body = serde_json::to_value(Registration {
        username: "pasang".to_owned(),
        email: "p@example.com".to_owned(),
        phone_number: "9800000000".to_owned(),
        password: "pw123456".to_owned(),
        confirm_password: "pw123456".to_owned(),
    })
    .unwrap();
    let mut keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["confirm_password", "email", "password", "phone_number", "username"]);
}
