// tests/support/mocks/store.rs
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use folio_core::application::services::Repositories;
use folio_core::domain::content::{
    EntityId, NewPost, NewProject, NewTag, Post, PostRepository, PostStatus, PostUpdate,
    Project, ProjectRepository, ProjectUpdate, Tag, TagRepository, TagUpdate, Title,
};
use folio_core::domain::errors::{DomainError, DomainResult};
use folio_core::domain::revision::{
    NewRevision, Revision, RevisionContent, RevisionId, RevisionRepository, RevisionVersion,
};
use folio_core::domain::slug::{Slug, SlugLookup, SlugNamespace};

#[derive(Default)]
struct State {
    last_id: i64,
    posts: BTreeMap<i64, Post>,
    projects: BTreeMap<i64, Project>,
    tags: BTreeMap<i64, Tag>,
    revisions: BTreeMap<i64, Revision>,
    // Highest revision version ever claimed per post, like `posts.last_revision_version`.
    claimed_versions: BTreeMap<i64, RevisionVersion>,
    slug_lookups: Vec<String>,
    // Scripted interference from "another writer".
    post_insert_races: usize,
    revision_insert_races: usize,
    writes_before_post_update: usize,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn slug_in_use(&self, namespace: SlugNamespace, slug: &str, exclude: Option<i64>) -> bool {
        let other = |id: &i64| Some(*id) != exclude;
        match namespace {
            SlugNamespace::Posts => self
                .posts
                .iter()
                .any(|(id, p)| other(id) && p.slug.as_str() == slug),
            SlugNamespace::Projects => self
                .projects
                .iter()
                .any(|(id, p)| other(id) && p.slug.as_str() == slug),
            SlugNamespace::Tags => self
                .tags
                .iter()
                .any(|(id, t)| other(id) && t.slug.as_str() == slug),
        }
    }

    fn version_claimed(&self, post_id: EntityId, version: RevisionVersion) -> bool {
        self.claimed_versions
            .get(&i64::from(post_id))
            .is_some_and(|claimed| version <= *claimed)
    }

    fn claim_version(&mut self, post_id: EntityId, version: RevisionVersion) {
        let claimed = self.claimed_versions.entry(i64::from(post_id)).or_insert(version);
        *claimed = (*claimed).max(version);
    }

    fn ensure_tags_exist(&self, tag_ids: &[EntityId]) -> DomainResult<()> {
        if tag_ids.iter().all(|id| self.tags.contains_key(&i64::from(*id))) {
            Ok(())
        } else {
            Err(DomainError::NotFound("tag not found".into()))
        }
    }
}

fn slug_taken(table: &str) -> DomainError {
    DomainError::SlugTaken(format!("{table}_slug_key"))
}

/// One in-memory database behind every repository port, enforcing the same
/// unique constraints and conditional writes as the Postgres schema.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories {
            posts: self.clone(),
            projects: self.clone(),
            tags: self.clone(),
            revisions: self.clone(),
            slugs: self.clone(),
        }
    }

    /// The next `n` post inserts find their slug claimed by a competing post.
    pub fn race_post_inserts(&self, n: usize) {
        self.state.lock().unwrap().post_insert_races = n;
    }

    /// The next `n` revision inserts find their version claimed concurrently.
    pub fn race_revision_inserts(&self, n: usize) {
        self.state.lock().unwrap().revision_insert_races = n;
    }

    /// Another writer touches the post right before the next post update.
    pub fn write_before_next_post_update(&self) {
        self.state.lock().unwrap().writes_before_post_update = 1;
    }

    pub fn seed_post(&self, title: &str, slug: &str, content: &str, at: DateTime<Utc>) -> Post {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let post = Post {
            id: EntityId::new(id).unwrap(),
            title: Title::new(title).unwrap(),
            slug: Slug::new(slug).unwrap(),
            content: content.into(),
            excerpt: None,
            status: PostStatus::Draft,
            published_at: None,
            scheduled_at: None,
            tag_ids: Vec::new(),
            created_at: at,
            updated_at: at,
        };
        state.posts.insert(id, post.clone());
        post
    }

    pub fn seed_revision(&self, post: &Post, version: i32, content: &str) -> Revision {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let revision = Revision {
            id: RevisionId::new(id).unwrap(),
            post_id: post.id,
            version: RevisionVersion::new(version).unwrap(),
            content: RevisionContent::new(content, None),
            created_at: post.updated_at,
        };
        state.claim_version(post.id, revision.version);
        state.revisions.insert(id, revision.clone());
        revision
    }

    pub fn post(&self, id: i64) -> Post {
        self.state.lock().unwrap().posts[&id].clone()
    }

    /// Oldest first.
    pub fn revisions_of(&self, post_id: i64) -> Vec<Revision> {
        let state = self.state.lock().unwrap();
        let mut revisions: Vec<Revision> = state
            .revisions
            .values()
            .filter(|r| i64::from(r.post_id) == post_id)
            .cloned()
            .collect();
        revisions.sort_by_key(|r| r.version);
        revisions
    }

    pub fn slug_lookups(&self) -> Vec<String> {
        self.state.lock().unwrap().slug_lookups.clone()
    }
}

#[async_trait]
impl SlugLookup for InMemoryStore {
    async fn slug_exists(
        &self,
        namespace: SlugNamespace,
        slug: &Slug,
        exclude: Option<EntityId>,
    ) -> DomainResult<bool> {
        let mut state = self.state.lock().unwrap();
        state.slug_lookups.push(format!("{namespace}:{slug}"));
        Ok(state.slug_in_use(namespace, slug.as_str(), exclude.map(i64::from)))
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn insert(&self, post: NewPost) -> DomainResult<Post> {
        let mut state = self.state.lock().unwrap();

        if state.post_insert_races > 0 {
            state.post_insert_races -= 1;
            let id = state.next_id();
            let competitor = Post {
                id: EntityId::new(id).unwrap(),
                title: Title::new("competitor").unwrap(),
                slug: post.slug.clone(),
                content: "competitor".into(),
                excerpt: None,
                status: PostStatus::Draft,
                published_at: None,
                scheduled_at: None,
                tag_ids: Vec::new(),
                created_at: post.created_at,
                updated_at: post.updated_at,
            };
            state.posts.insert(id, competitor);
        }

        if state.slug_in_use(SlugNamespace::Posts, post.slug.as_str(), None) {
            return Err(slug_taken("posts"));
        }
        state.ensure_tags_exist(&post.tag_ids)?;

        let id = state.next_id();
        let created = Post {
            id: EntityId::new(id).unwrap(),
            title: post.title,
            slug: post.slug,
            content: post.content,
            excerpt: post.excerpt,
            status: post.publication.status,
            published_at: post.publication.published_at,
            scheduled_at: post.publication.scheduled_at,
            tag_ids: post.tag_ids,
            created_at: post.created_at,
            updated_at: post.updated_at,
        };
        state.posts.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, update: PostUpdate) -> DomainResult<Post> {
        let mut state = self.state.lock().unwrap();
        let id = i64::from(update.id);

        if state.writes_before_post_update > 0 {
            state.writes_before_post_update -= 1;
            if let Some(post) = state.posts.get_mut(&id) {
                post.updated_at += Duration::milliseconds(1500);
            }
        }

        let current = state
            .posts
            .get(&id)
            .ok_or_else(|| DomainError::NotFound(format!("post {id} not found")))?;
        if let Some(expected) = update.expected_updated_at {
            if current.updated_at != expected {
                return Err(DomainError::ConcurrentModification(
                    "post was modified concurrently".into(),
                ));
            }
        }
        if let Some(slug) = &update.slug {
            if state.slug_in_use(SlugNamespace::Posts, slug.as_str(), Some(id)) {
                return Err(slug_taken("posts"));
            }
        }
        if let Some(tag_ids) = &update.tag_ids {
            state.ensure_tags_exist(tag_ids)?;
        }

        let post = state.posts.get_mut(&id).unwrap();
        if let Some(title) = update.title {
            post.title = title;
        }
        if let Some(slug) = update.slug {
            post.slug = slug;
        }
        if let Some(content) = update.content {
            post.content = content;
        }
        if let Some(excerpt) = update.excerpt {
            post.excerpt = excerpt;
        }
        if let Some(publication) = update.publication {
            post.status = publication.status;
            post.published_at = publication.published_at;
            post.scheduled_at = publication.scheduled_at;
        }
        if let Some(tag_ids) = update.tag_ids {
            post.tag_ids = tag_ids;
        }
        post.updated_at = update.updated_at;
        Ok(post.clone())
    }

    async fn find_by_id(&self, id: EntityId) -> DomainResult<Option<Post>> {
        let state = self.state.lock().unwrap();
        Ok(state.posts.get(&i64::from(id)).cloned())
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Post>> {
        let state = self.state.lock().unwrap();
        Ok(state.posts.values().find(|p| &p.slug == slug).cloned())
    }

    async fn delete(&self, id: EntityId) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.posts.remove(&i64::from(id)).is_none() {
            return Err(DomainError::NotFound(format!("post {id} not found")));
        }
        state.revisions.retain(|_, r| r.post_id != id);
        state.claimed_versions.remove(&i64::from(id));
        Ok(())
    }
}

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn insert(&self, project: NewProject) -> DomainResult<Project> {
        let mut state = self.state.lock().unwrap();
        if state.slug_in_use(SlugNamespace::Projects, project.slug.as_str(), None) {
            return Err(slug_taken("projects"));
        }

        let id = state.next_id();
        let created = Project {
            id: EntityId::new(id).unwrap(),
            title: project.title,
            slug: project.slug,
            description: project.description,
            created_at: project.created_at,
            updated_at: project.updated_at,
        };
        state.projects.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, update: ProjectUpdate) -> DomainResult<Project> {
        let mut state = self.state.lock().unwrap();
        let id = i64::from(update.id);
        if !state.projects.contains_key(&id) {
            return Err(DomainError::NotFound(format!("project {id} not found")));
        }
        if let Some(slug) = &update.slug {
            if state.slug_in_use(SlugNamespace::Projects, slug.as_str(), Some(id)) {
                return Err(slug_taken("projects"));
            }
        }

        let project = state.projects.get_mut(&id).unwrap();
        if let Some(title) = update.title {
            project.title = title;
        }
        if let Some(slug) = update.slug {
            project.slug = slug;
        }
        if let Some(description) = update.description {
            project.description = description;
        }
        project.updated_at = update.updated_at;
        Ok(project.clone())
    }

    async fn find_by_id(&self, id: EntityId) -> DomainResult<Option<Project>> {
        let state = self.state.lock().unwrap();
        Ok(state.projects.get(&i64::from(id)).cloned())
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Project>> {
        let state = self.state.lock().unwrap();
        Ok(state.projects.values().find(|p| &p.slug == slug).cloned())
    }

    async fn delete(&self, id: EntityId) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        state
            .projects
            .remove(&i64::from(id))
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound(format!("project {id} not found")))
    }
}

#[async_trait]
impl TagRepository for InMemoryStore {
    async fn insert(&self, tag: NewTag) -> DomainResult<Tag> {
        let mut state = self.state.lock().unwrap();
        if state.tags.values().any(|t| t.name == tag.name) {
            return Err(DomainError::Conflict("tag name already exists".into()));
        }
        if state.slug_in_use(SlugNamespace::Tags, tag.slug.as_str(), None) {
            return Err(slug_taken("tags"));
        }

        let id = state.next_id();
        let created = Tag {
            id: EntityId::new(id).unwrap(),
            name: tag.name,
            slug: tag.slug,
            created_at: tag.created_at,
            updated_at: tag.updated_at,
        };
        state.tags.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, update: TagUpdate) -> DomainResult<Tag> {
        let mut state = self.state.lock().unwrap();
        let id = i64::from(update.id);
        if !state.tags.contains_key(&id) {
            return Err(DomainError::NotFound(format!("tag {id} not found")));
        }
        if let Some(name) = &update.name {
            if state.tags.iter().any(|(other, t)| *other != id && &t.name == name) {
                return Err(DomainError::Conflict("tag name already exists".into()));
            }
        }
        if let Some(slug) = &update.slug {
            if state.slug_in_use(SlugNamespace::Tags, slug.as_str(), Some(id)) {
                return Err(slug_taken("tags"));
            }
        }

        let tag = state.tags.get_mut(&id).unwrap();
        if let Some(name) = update.name {
            tag.name = name;
        }
        if let Some(slug) = update.slug {
            tag.slug = slug;
        }
        tag.updated_at = update.updated_at;
        Ok(tag.clone())
    }

    async fn find_by_id(&self, id: EntityId) -> DomainResult<Option<Tag>> {
        let state = self.state.lock().unwrap();
        Ok(state.tags.get(&i64::from(id)).cloned())
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Tag>> {
        let state = self.state.lock().unwrap();
        Ok(state.tags.values().find(|t| &t.slug == slug).cloned())
    }

    async fn delete(&self, id: EntityId) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.tags.remove(&i64::from(id)).is_none() {
            return Err(DomainError::NotFound(format!("tag {id} not found")));
        }
        for post in state.posts.values_mut() {
            post.tag_ids.retain(|tag_id| *tag_id != id);
        }
        Ok(())
    }
}

#[async_trait]
impl RevisionRepository for InMemoryStore {
    async fn highest_claimed_version(
        &self,
        post_id: EntityId,
    ) -> DomainResult<Option<RevisionVersion>> {
        let state = self.state.lock().unwrap();
        Ok(state.claimed_versions.get(&i64::from(post_id)).copied())
    }

    async fn insert(&self, revision: NewRevision) -> DomainResult<Revision> {
        let mut state = self.state.lock().unwrap();
        if !state.posts.contains_key(&i64::from(revision.post_id)) {
            return Err(DomainError::NotFound("post not found".into()));
        }

        if state.revision_insert_races > 0 {
            state.revision_insert_races -= 1;
            let id = state.next_id();
            let competitor = Revision {
                id: RevisionId::new(id).unwrap(),
                post_id: revision.post_id,
                version: revision.version,
                content: RevisionContent::new("concurrent edit", None),
                created_at: revision.created_at,
            };
            state.claim_version(revision.post_id, revision.version);
            state.revisions.insert(id, competitor);
        }

        if state.version_claimed(revision.post_id, revision.version) {
            return Err(DomainError::VersionTaken(format!(
                "version {} already claimed for post {}",
                revision.version, revision.post_id
            )));
        }
        state.claim_version(revision.post_id, revision.version);

        let id = state.next_id();
        let created = Revision {
            id: RevisionId::new(id).unwrap(),
            post_id: revision.post_id,
            version: revision.version,
            content: revision.content,
            created_at: revision.created_at,
        };
        state.revisions.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: RevisionId) -> DomainResult<Option<Revision>> {
        let state = self.state.lock().unwrap();
        Ok(state.revisions.get(&i64::from(id)).cloned())
    }

    async fn find_by_version(
        &self,
        post_id: EntityId,
        version: RevisionVersion,
    ) -> DomainResult<Option<Revision>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .revisions
            .values()
            .find(|r| r.post_id == post_id && r.version == version)
            .cloned())
    }

    async fn latest(&self, post_id: EntityId) -> DomainResult<Option<Revision>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .revisions
            .values()
            .filter(|r| r.post_id == post_id)
            .max_by_key(|r| r.version)
            .cloned())
    }

    async fn list_by_post(&self, post_id: EntityId) -> DomainResult<Vec<Revision>> {
        let state = self.state.lock().unwrap();
        let mut revisions: Vec<Revision> = state
            .revisions
            .values()
            .filter(|r| r.post_id == post_id)
            .cloned()
            .collect();
        revisions.sort_by(|a, b| b.version.cmp(&a.version));
        Ok(revisions)
    }

    async fn count_by_post(&self, post_id: EntityId) -> DomainResult<u64> {
        let state = self.state.lock().unwrap();
        Ok(state
            .revisions
            .values()
            .filter(|r| r.post_id == post_id)
            .count() as u64)
    }

    async fn delete(&self, id: RevisionId) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        state
            .revisions
            .remove(&i64::from(id))
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound(format!("revision {id} not found")))
    }
}
