// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{
            posts::PostCommandService, projects::ProjectCommandService, tags::TagCommandService,
        },
        ports::{ClockPort, SlugGeneratorPort},
        queries::{ContentQueryService, RevisionQueryService},
    },
    domain::{
        content::{PostRepository, ProjectRepository, TagRepository},
        revision::{RevisionGuard, RevisionRepository},
        slug::{SlugLookup, SlugService},
    },
};

/// Storage adapters the application services are built on.
pub struct Repositories {
    pub posts: Arc<dyn PostRepository>,
    pub projects: Arc<dyn ProjectRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub revisions: Arc<dyn RevisionRepository>,
    pub slugs: Arc<dyn SlugLookup>,
}

pub struct ApplicationServices {
    pub post_commands: Arc<PostCommandService>,
    pub project_commands: Arc<ProjectCommandService>,
    pub tag_commands: Arc<TagCommandService>,
    pub content_queries: Arc<ContentQueryService>,
    pub revision_queries: Arc<RevisionQueryService>,
    slug_service: Arc<SlugService>,
}

impl ApplicationServices {
    pub fn new(
        repositories: Repositories,
        clock: Arc<ClockPort>,
        slugger: Arc<SlugGeneratorPort>,
        write_retry_limit: u32,
    ) -> Self {
        let Repositories {
            posts,
            projects,
            tags,
            revisions,
            slugs,
        } = repositories;

        let slug_service = Arc::new(SlugService::new(slugs, slugger, Arc::clone(&clock)));

        let guard = Arc::new(RevisionGuard::new(
            Arc::clone(&posts),
            Arc::clone(&revisions),
            Arc::clone(&clock),
            write_retry_limit,
        ));

        let post_commands = Arc::new(PostCommandService::new(
            Arc::clone(&posts),
            Arc::clone(&revisions),
            Arc::clone(&slug_service),
            guard,
            Arc::clone(&clock),
            write_retry_limit,
        ));

        let project_commands = Arc::new(ProjectCommandService::new(
            Arc::clone(&projects),
            Arc::clone(&slug_service),
            Arc::clone(&clock),
            write_retry_limit,
        ));

        let tag_commands = Arc::new(TagCommandService::new(
            Arc::clone(&tags),
            Arc::clone(&slug_service),
            clock,
            write_retry_limit,
        ));

        let content_queries = Arc::new(ContentQueryService::new(
            Arc::clone(&posts),
            projects,
            tags,
        ));
        let revision_queries = Arc::new(RevisionQueryService::new(posts, revisions));

        Self {
            post_commands,
            project_commands,
            tag_commands,
            content_queries,
            revision_queries,
            slug_service,
        }
    }

    pub fn slug_service(&self) -> Arc<SlugService> {
        Arc::clone(&self.slug_service)
    }
}
