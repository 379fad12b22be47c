//! Single blog post.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::blog_body::BlogBody;
use crate::components::fetch_status::fetch_view;
use crate::hooks::use_blog_post;

#[component]
pub fn BlogPostPage() -> impl IntoView {
    let params = use_params_map();
    let post = use_blog_post(move || params.with(|p| p.get("slug").unwrap_or_default()));

    view! {
        <article class="blog-post">
            <a class="blog-post__back" href="/blog">
                "← All posts"
            </a>
            {move || {
                fetch_view(
                    post.get(),
                    |post| {
                        let byline = [
                            post.author.clone(),
                            post.published_at.clone(),
                            post.read_time.map(|m| format!("{m} min read")),
                        ]
                        .into_iter()
                        .flatten()
                        .collect::<Vec<_>>()
                        .join(" · ");
                        let body = post.body();
                        view! {
                            <header class="blog-post__header">
                                {post.category.map(|c| view! { <span class="blog-post__category">{c}</span> })}
                                <h1>{post.title}</h1>
                                {post.subtitle.map(|s| view! { <p class="blog-post__subtitle">{s}</p> })}
                                <p class="blog-post__byline">{byline}</p>
                            </header>
                            {post
                                .featured_image
                                .map(|image| {
                                    view! {
                                        <figure class="blog-post__image">
                                            <img src=image.url alt=image.alt.unwrap_or_default()/>
                                            {image.caption.map(|c| view! { <figcaption>{c}</figcaption> })}
                                        </figure>
                                    }
                                })}
                            <BlogBody content=body/>
                        }
                            .into_any()
                    },
                )
            }}
        </article>
    }
}
