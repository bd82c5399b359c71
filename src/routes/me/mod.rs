mod change_password;
mod create_task;
mod delete_task;
mod get_task;
mod list_tasks;
mod update_task;

pub use change_password::change_password;
pub use create_task::create_task;
pub use delete_task::delete_task;
pub use get_task::get_task;
pub use list_tasks::list_tasks;
pub use update_task::update_task;
