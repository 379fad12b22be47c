//! Blog listing with category filter and pagination.
//!
//! The current category and page live in the query string (`?category=&page=`)
//! so listings are linkable and the back button works.

#[cfg(test)]
#[path = "blog_test.rs"]
mod blog_test;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::blog_card::BlogCard;
use crate::components::fetch_status::fetch_view;
use crate::hooks::{use_blog_categories, use_blog_posts};
use crate::net::api::BlogQuery;

/// Build the listing query from raw query-string values.
///
/// Missing or blank category means all posts; a missing or invalid page is 1.
pub fn blog_query_from_params(category: Option<&str>, page: Option<&str>) -> BlogQuery {
    let category = category.map(str::trim).filter(|c| !c.is_empty()).unwrap_or("all");
    let page = page.and_then(|p| p.trim().parse::<u32>().ok()).filter(|p| *p > 0).unwrap_or(1);
    BlogQuery::new(category, page)
}

/// Link to a listing page; the defaults are left out of the URL.
pub fn blog_list_href(query: &BlogQuery) -> String {
    let mut params = Vec::new();
    if !query.is_all() {
        params.push(format!("category={}", urlencoding::encode(&query.category)));
    }
    if query.page > 1 {
        params.push(format!("page={}", query.page));
    }
    if params.is_empty() { "/blog".to_owned() } else { format!("/blog?{}", params.join("&")) }
}

#[component]
pub fn BlogListPage() -> impl IntoView {
    let query_map = use_query_map();
    let query = Memo::new(move |_| {
        query_map.with(|q| blog_query_from_params(q.get("category").as_deref(), q.get("page").as_deref()))
    });
    let posts = use_blog_posts(move || query.get());
    let categories = use_blog_categories();

    let category_link = move |slug: String, name: String| {
        let href = blog_list_href(&BlogQuery::new(slug.clone(), 1));
        view! {
            <a
                class="blog-filter__item"
                class=("blog-filter__item--active", move || query.with(|q| q.category == slug))
                href=href
            >
                {name}
            </a>
        }
    };

    view! {
        <section class="blog-page">
            <h1>"Travel Blog"</h1>
            <nav class="blog-filter">
                {category_link("all".to_owned(), "All".to_owned())}
                {move || {
                    categories
                        .get()
                        .data
                        .unwrap_or_default()
                        .into_iter()
                        .map(|c| category_link(c.slug, c.name))
                        .collect_view()
                }}
            </nav>
            {move || {
                fetch_view(
                    posts.get(),
                    |page| {
                        let current = query.get_untracked();
                        let prev = page
                            .has_previous()
                            .then(|| blog_list_href(&BlogQuery::new(current.category.clone(), current.page.saturating_sub(1))));
                        let next = page
                            .has_next()
                            .then(|| blog_list_href(&BlogQuery::new(current.category.clone(), current.page + 1)));
                        if page.results.is_empty() {
                            return view! { <p class="blog-page__empty">"No posts in this category yet."</p> }.into_any();
                        }
                        view! {
                            <div class="blog-page__grid">
                                {page.results.into_iter().map(|post| view! { <BlogCard post=post/> }).collect_view()}
                            </div>
                            <div class="blog-page__pager">
                                {prev.map(|href| view! { <a class="blog-page__prev" href=href>"Newer posts"</a> })}
                                <span class="blog-page__count">{format!("{} posts", page.count)}</span>
                                {next.map(|href| view! { <a class="blog-page__next" href=href>"Older posts"</a> })}
                            </div>
                        }
                            .into_any()
                    },
                )
            }}
        </section>
    }
}
