use crate::Task;
use uuid::Uuid;

pub const CHECKED_PREFIX: &str = "[x] ";
pub const UNCHECKED_PREFIX: &str = "[ ] ";

/// Ordered in-memory task list; insertion order is display order.
///
/// The registry never performs IO. Callers refresh the visible list and save
/// through the store after each successful mutation, preserving the
/// mutate-refresh-save sequence around every user action.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
}

impl TaskRegistry {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Append a new unchecked task. Blank text is rejected as a no-op.
    pub fn add(&mut self, text: &str) -> Option<Uuid> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let task = Task::new(text);
        let id = task.id;
        self.tasks.push(task);
        Some(id)
    }

    /// Delete the task with the given id; unknown ids are a no-op.
    pub fn remove(&mut self, id: Uuid) -> bool {
        match self.tasks.iter().position(|task| task.id == id) {
            Some(index) => {
                self.tasks.remove(index);
                true
            }
            None => false,
        }
    }

    /// Flip `completed` on the task with the given id and return the new
    /// value; unknown ids are a no-op.
    pub fn toggle(&mut self, id: Uuid) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.completed = !task.completed;
        Some(task.completed)
    }

    /// Append one unchecked task per non-blank line; returns how many were
    /// appended.
    pub fn append_lines<'a, I>(&mut self, lines: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let before = self.tasks.len();
        for line in lines {
            self.add(line);
        }
        self.tasks.len() - before
    }

    /// Visible rendering: one line per task, in list order, prefixed by the
    /// checked marker iff the task is completed.
    pub fn render_lines(&self) -> Vec<String> {
        self.tasks
            .iter()
            .map(|task| {
                let prefix = if task.completed {
                    CHECKED_PREFIX
                } else {
                    UNCHECKED_PREFIX
                };
                format!("{prefix}{}", task.text)
            })
            .collect()
    }
}
