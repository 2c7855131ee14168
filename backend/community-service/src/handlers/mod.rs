//! HTTP handlers and the route table
//!
//! JSON endpoints live under `/api/v1`; escaped HTML fragments for the
//! static pages live under `/fragments`.

pub mod activity;
pub mod attendance;
pub mod board;
pub mod comments;
pub mod fragments;
pub mod health;
pub mod media;
pub mod members;
pub mod news;

use crate::metrics::serve_metrics;
use actix_web::web;

/// Register every route of the service
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/metrics", web::get().to(serve_metrics))
        .route("/api/v1/health", web::get().to(health::health_summary))
        .route("/api/v1/health/live", web::get().to(health::liveness_check))
        .route("/api/v1/health/ready", web::get().to(health::readiness_check))
        .route(
            "/api/v1/health/reinitialize",
            web::post().to(health::reinitialize),
        )
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/news")
                        .service(
                            web::resource("")
                                .route(web::get().to(news::list_news))
                                .route(web::post().to(news::create_news)),
                        )
                        .route("/latest", web::get().to(news::latest_news))
                        .service(
                            web::resource("/{id}")
                                .route(web::get().to(news::get_news))
                                .route(web::patch().to(news::update_news))
                                .route(web::delete().to(news::delete_news)),
                        )
                        .service(
                            web::resource("/{id}/comments")
                                .route(web::get().to(comments::list_comments))
                                .route(web::post().to(comments::create_comment)),
                        ),
                )
                .service(
                    web::resource("/comments/{id}/replies")
                        .route(web::get().to(comments::list_replies))
                        .route(web::post().to(comments::create_reply)),
                )
                .service(
                    web::scope("/board")
                        .service(
                            web::resource("")
                                .route(web::get().to(board::list_posts))
                                .route(web::post().to(board::create_post)),
                        )
                        .service(
                            web::resource("/{id}")
                                .route(web::patch().to(board::update_post))
                                .route(web::delete().to(board::delete_post)),
                        ),
                )
                .route("/activity", web::get().to(activity::get_activity))
                .service(
                    web::resource("/events/{id}/participants")
                        .route(web::get().to(attendance::list_participants))
                        .route(web::post().to(attendance::add_participant)),
                )
                .route(
                    "/events/{id}/participants/{member}",
                    web::delete().to(attendance::remove_participant),
                )
                .route("/members", web::get().to(members::list_members))
                .route(
                    "/media/{bucket}/{path:.*}",
                    web::post().to(media::upload_media),
                ),
        )
        .service(
            web::scope("/fragments")
                .route("/news", web::get().to(fragments::news))
                .route("/news/latest", web::get().to(fragments::latest_news))
                .route("/news/{id}/comments", web::get().to(fragments::comments))
                .route("/board", web::get().to(fragments::board))
                .route(
                    "/events/{id}/participants",
                    web::get().to(fragments::participants),
                )
                .route("/members", web::get().to(fragments::members)),
        );
}
