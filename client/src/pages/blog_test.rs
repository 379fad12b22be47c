use super::*;

#[test]
fn missing_params_mean_first_page_of_everything() {
    assert_eq!(blog_query_from_params(None, None), BlogQuery::default());
    assert_eq!(blog_query_from_params(Some("  "), Some("")), BlogQuery::default());
}

#[test]
fn invalid_pages_fall_back_to_one() {
    assert_eq!(blog_query_from_params(Some("gear"), Some("0")).page, 1);
    assert_eq!(blog_query_from_params(Some("gear"), Some("two")).page, 1);
    assert_eq!(blog_query_from_params(Some("gear"), Some("-3")).page, 1);
}

#[test]
fn params_are_kept() {
    assert_eq!(blog_query_from_params(Some("gear"), Some("3")), BlogQuery::new("gear", 3));
}

#[test]
fn hrefs_omit_defaults() {
    assert_eq!(blog_list_href(&BlogQuery::default()), "/blog");
    assert_eq!(blog_list_href(&BlogQuery::new("all", 2)), "/blog?page=2");
    assert_eq!(blog_list_href(&BlogQuery::new("trail news", 1)), "/blog?category=trail%20news");
    assert_eq!(blog_list_href(&BlogQuery::new("gear", 4)), "/blog?category=gear&page=4");
}
