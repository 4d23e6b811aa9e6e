mod dispatcher;
mod function_task;
mod route;

pub(crate) use dispatcher::Dispatcher;
pub(crate) use function_task::FunctionTask;
pub(crate) use route::Route;
