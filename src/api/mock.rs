//! Scripted in-memory course backend for store tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{ListFilters, ListPage, Pagination, ResourceClient};
use crate::errors::AppError;
use crate::models::{Course, CourseDraft, EntityId, OrderEntry, StatusUpdate};

pub(crate) fn course(id: EntityId, title: &str, order: i32) -> Course {
    Course {
        id,
        title: title.to_string(),
        slug: None,
        category: None,
        description: None,
        duration_weeks: None,
        fee: None,
        image_url: None,
        display_order: order,
        is_active: true,
        updated_at: None,
    }
}

#[derive(Default)]
pub(crate) struct MockCourseClient {
    pub server: Mutex<Vec<Course>>,
    /// Pagination reported with every list response.
    pub pagination: Mutex<Option<Pagination>>,
    pub fail_list: AtomicBool,
    pub fail_reorder: AtomicBool,
    pub fail_toggle: AtomicBool,
    pub reject_toggle: Mutex<Option<String>>,
    /// Forces the reported flag, as a server-side cascade would.
    pub toggle_report: Mutex<Option<bool>>,
    /// Scheduler yields before a toggle resolves.
    pub toggle_yields: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub reorder_calls: AtomicUsize,
    pub toggle_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
}

impl MockCourseClient {
    pub fn with_courses(courses: Vec<Course>) -> Self {
        Self {
            server: Mutex::new(courses),
            ..Self::default()
        }
    }

    pub fn abc() -> Self {
        Self::with_courses(vec![
            course(1, "A", 1),
            course(2, "B", 2),
            course(3, "C", 3),
        ])
    }

    pub fn server_titles(&self) -> Vec<String> {
        let mut courses = self.server.lock().clone();
        courses.sort_by_key(|c| c.display_order);
        courses.into_iter().map(|c| c.title).collect()
    }
}

#[async_trait]
impl ResourceClient<Course> for MockCourseClient {
    async fn list(&self, filters: &ListFilters) -> Result<ListPage<Course>, AppError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(AppError::Transport("connection refused".into()));
        }
        let mut items = self.server.lock().clone();
        if let Some(active) = filters.is_active {
            items.retain(|c| c.is_active == active);
        }
        Ok(ListPage {
            items,
            pagination: *self.pagination.lock(),
        })
    }

    async fn get(&self, id: EntityId) -> Result<Course, AppError> {
        self.server
            .lock()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| AppError::Rejected(format!("Course {} not found", id)))
    }

    async fn create(&self, draft: &CourseDraft) -> Result<Course, AppError> {
        let mut server = self.server.lock();
        let id = server.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let mut created = course(id, &draft.title, server.len() as i32 + 1);
        created.is_active = draft.is_active.unwrap_or(true);
        server.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: EntityId, draft: &CourseDraft) -> Result<Course, AppError> {
        let mut server = self.server.lock();
        let existing = server
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::Rejected(format!("Course {} not found", id)))?;
        existing.title = draft.title.clone();
        Ok(existing.clone())
    }

    async fn toggle_status(&self, id: EntityId) -> Result<StatusUpdate, AppError> {
        self.toggle_calls.fetch_add(1, Ordering::SeqCst);
        for _ in 0..self.toggle_yields.load(Ordering::SeqCst) {
            tokio::task::yield_now().await;
        }
        if self.fail_toggle.load(Ordering::SeqCst) {
            return Err(AppError::Transport("timed out".into()));
        }
        if let Some(message) = self.reject_toggle.lock().clone() {
            return Err(AppError::Rejected(message));
        }
        let report = *self.toggle_report.lock();
        let mut server = self.server.lock();
        let existing = server
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::Rejected(format!("Course {} not found", id)))?;
        existing.is_active = report.unwrap_or(!existing.is_active);
        Ok(StatusUpdate {
            is_active: existing.is_active,
        })
    }

    async fn reorder(&self, entries: &[OrderEntry]) -> Result<(), AppError> {
        self.reorder_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reorder.load(Ordering::SeqCst) {
            return Err(AppError::Rejected("Reorder failed".into()));
        }
        let mut server = self.server.lock();
        for entry in entries {
            if let Some(existing) = server.iter_mut().find(|c| c.id == entry.id) {
                existing.display_order = entry.display_order;
            }
        }
        Ok(())
    }

    async fn delete(&self, id: EntityId) -> Result<(), AppError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        let mut server = self.server.lock();
        server.retain(|c| c.id != id);
        server.sort_by_key(|c| c.display_order);
        for (position, existing) in server.iter_mut().enumerate() {
            existing.display_order = position as i32 + 1;
        }
        Ok(())
    }
}
