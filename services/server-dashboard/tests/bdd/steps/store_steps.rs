//! BDD steps that set up and inspect the server list

use cucumber::gherkin::Step;
use cucumber::{given, then};

use server_dashboard::{DashboardError, ServerRecord, Status};

use crate::common::{ids, listing, server, Harness};
use crate::world::DashboardWorld;

fn parse_status(s: &str) -> Status {
    s.parse().unwrap_or_else(|e| panic!("{}", e))
}

fn parse_ids(s: &str) -> Vec<i64> {
    s.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| id.parse().expect("server ids are integers"))
        .collect()
}

#[given("the dashboard shows the servers")]
async fn dashboard_shows(world: &mut DashboardWorld, step: &Step) {
    let table = step.table.as_ref().expect("server table missing");
    let servers: Vec<ServerRecord> = table
        .rows
        .iter()
        .skip(1)
        .map(|row| server(row[0].parse().expect("id"), parse_status(&row[1])))
        .collect();
    world.harness = Some(Harness::loaded_with(servers).await);
}

#[given(expr = "the server API lists servers {string}")]
fn api_lists(world: &mut DashboardWorld, listed: String) {
    world.harness = Some(Harness::new());
    let servers = parse_ids(&listed)
        .into_iter()
        .map(|id| server(id, Status::ServerUp))
        .collect();
    world.harness().api.reply(Ok(listing(servers)));
}

#[given(expr = "the server API fails with {string}")]
fn api_fails(world: &mut DashboardWorld, message: String) {
    world.harness = Some(Harness::new());
    world
        .harness()
        .api
        .reply(Err(DashboardError::Http(message)));
}

#[then(expr = "the dashboard shows servers {string}")]
fn shows_servers(world: &mut DashboardWorld, expected: String) {
    let view = world.last_view.as_ref().expect("no view state");
    assert_eq!(ids(view), parse_ids(&expected), "view: {:?}", view);
}

#[then(expr = "server {int} is {string}")]
fn server_has_status(world: &mut DashboardWorld, id: i64, status: String) {
    let store = world.harness().dashboard.store();
    let record = store.find(id).expect("server not in store");
    assert_eq!(record.status, parse_status(&status));
}

#[then(expr = "the store holds servers {string}")]
fn store_holds(world: &mut DashboardWorld, expected: String) {
    let store = world.harness().dashboard.store();
    let actual: Vec<i64> = store.servers().iter().map(|s| s.id).collect();
    assert_eq!(actual, parse_ids(&expected));
}

#[then(expr = "the dashboard shows the error {string}")]
fn shows_error(world: &mut DashboardWorld, expected: String) {
    let view = world.last_view.as_ref().expect("no view state");
    assert_eq!(view.error_message(), Some(expected.as_str()));
}
