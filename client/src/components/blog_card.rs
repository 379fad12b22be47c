//! Blog post teaser used by the blog listing.

use leptos::prelude::*;

use crate::net::types::BlogPost;

#[component]
pub fn BlogCard(post: BlogPost) -> impl IntoView {
    let href = format!("/blog/{}", post.slug);
    let excerpt = post.summary().map(str::to_owned);
    let image = post.featured_image.clone().map(|image| {
        let alt = image.alt.unwrap_or_else(|| post.title.clone());
        view! { <img class="blog-card__image" src=image.url alt=alt loading="lazy"/> }
    });
    let meta = post.read_time.map(|m| format!("{m} min read"));
    view! {
        <article class="blog-card">
            {image}
            <div class="blog-card__body">
                {post.category.clone().map(|c| view! { <span class="blog-card__category">{c}</span> })}
                <h3 class="blog-card__title">
                    <a href=href.clone()>{post.title.clone()}</a>
                </h3>
                {excerpt.map(|e| view! { <p class="blog-card__excerpt">{e}</p> })}
                {meta.map(|m| view! { <span class="blog-card__meta">{m}</span> })}
                <a class="blog-card__more" href=href>"Read more"</a>
            </div>
        </article>
    }
}
