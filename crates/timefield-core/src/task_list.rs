//! The ordered task list, addressed by 1-based indices.

use tracing::debug;

use crate::error::TimefieldError;
use crate::interval::Interval;
use crate::task::Task;

/// Tasks in insertion order. Index 1 is the first task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Append a task and return its index.
    pub fn add(&mut self, task: Task) -> usize {
        debug!(title = %task.title, "adding task");
        self.tasks.push(task);
        self.tasks.len()
    }

    /// Remove the task at `index`; later tasks shift down by one.
    ///
    /// # Errors
    ///
    /// Returns [`TimefieldError::InvalidTaskIndex`] if `index` is 0 or past
    /// the end.
    pub fn remove(&mut self, index: usize) -> Result<Task, TimefieldError> {
        let position = self.position(index)?;
        let task = self.tasks.remove(position);
        debug!(index, title = %task.title, "removed task");
        Ok(task)
    }

    /// # Errors
    ///
    /// Returns [`TimefieldError::InvalidTaskIndex`] if `index` is 0 or past
    /// the end.
    pub fn get(&self, index: usize) -> Result<&Task, TimefieldError> {
        let position = self.position(index)?;
        Ok(&self.tasks[position])
    }

    /// All tasks with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Task)> {
        self.tasks.iter().enumerate().map(|(i, task)| (i + 1, task))
    }

    /// Tasks whose interval intersects `window`, with their indices.
    pub fn iter_within<'a>(
        &'a self,
        window: &'a Interval,
    ) -> impl Iterator<Item = (usize, &'a Task)> + 'a {
        self.iter()
            .filter(move |(_, task)| task.interval.intersects(window))
    }

    fn position(&self, index: usize) -> Result<usize, TimefieldError> {
        if index == 0 || index > self.tasks.len() {
            return Err(TimefieldError::InvalidTaskIndex(index));
        }
        Ok(index - 1)
    }
}

impl FromIterator<Task> for TaskList {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        Self {
            tasks: iter.into_iter().collect(),
        }
    }
}
