//! GROQ queries sent to the CMS.
//!
//! Each query projects documents into exactly the shape the matching type in
//! [`crate::types`] deserializes, so field renames happen here rather than
//! in Rust. Ordering is applied again after fetching (see
//! [`crate::naming`]); the `order(...)` clauses only keep responses stable.

pub const PROFILE: &str = r#"*[_type == "speakerProfile"][0]{
  name,
  tagline,
  "bio": coalesce(bio, []),
  location,
  email,
  "socials": coalesce(socials[]{ platform, url }, [])
}"#;

pub const EVENTS: &str = r#"*[_type == "event" && !(_id in path("drafts.**"))] | order(date desc){
  _id,
  title,
  slug,
  date,
  endDate,
  location,
  url,
  kind,
  talk,
  order
}"#;

pub const TALKS: &str = r#"*[_type == "talk" && !(_id in path("drafts.**"))] | order(order asc){
  _id,
  title,
  slug,
  summary,
  "body": coalesce(body, []),
  videoUrl,
  slidesUrl,
  "tags": coalesce(tags, []),
  icon,
  order
}"#;

pub const WORKSHOPS: &str = r#"*[_type == "workshop" && !(_id in path("drafts.**"))] | order(order asc){
  _id,
  title,
  slug,
  summary,
  "body": coalesce(body, []),
  duration,
  level,
  order
}"#;

pub const PROJECTS: &str = r#"*[_type == "project" && !(_id in path("drafts.**"))] | order(order asc){
  _id,
  title,
  slug,
  summary,
  url,
  repo,
  icon,
  "tech": coalesce(tech, []),
  company,
  order
}"#;

pub const COMPANIES: &str = r#"*[_type == "company"]{
  _id,
  name,
  url,
  logo
}"#;

/// Media documents; image assets are flattened to their CDN URL.
pub const MEDIA: &str = r#"*[_type == "media" && defined(coalesce(file.asset->url, image.asset->url, url))]{
  _id,
  "url": coalesce(file.asset->url, image.asset->url, url),
  alt,
  "kind": coalesce(kind, "image")
}"#;

pub const TESTIMONIALS: &str = r#"*[_type == "testimonial" && !(_id in path("drafts.**"))] | order(order asc){
  _id,
  quote,
  author,
  role,
  company,
  order
}"#;

pub const METRICS: &str = r#"*[_type == "impactMetric"] | order(order asc){
  _id,
  label,
  value,
  unit,
  order
}"#;

/// Articles stored in the CMS itself, shaped like external posts.
pub const POSTS: &str = r#"*[_type == "externalPost" && defined(url)] | order(publishedAt desc){
  title,
  url,
  publishedAt,
  "source": "cms",
  thumbnail,
  "tags": coalesce(tags, [])
}"#;

/// Document types the queries above read, in fetch order.
pub const DOCUMENT_TYPES: &[&str] = &[
    "speakerProfile",
    "event",
    "talk",
    "workshop",
    "project",
    "company",
    "media",
    "testimonial",
    "impactMetric",
    "externalPost",
];
