use leptos::prelude::*;

use crate::components::stance_graph::{
	BAYERN_2013, ParseError, StanceGraph, StanceGraphCanvas, build_graph, parse_rows,
	rows_from_tsv,
};

/// Load pipeline: embedded TSV → parsed survey → stance graph. Any failure
/// is fatal; no partial graph is displayed.
fn load_landscape() -> Result<StanceGraph, ParseError> {
	let rows = rows_from_tsv(BAYERN_2013)?;
	let survey = parse_rows(&rows)?;
	Ok(build_graph(&survey))
}

/// The political landscape view.
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Failed to load the survey data"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			{move || {
				load_landscape()
					.map(|graph| {
						let data = Signal::derive(move || graph.clone());
						view! {
							<div class="fullscreen-graph">
								<StanceGraphCanvas data=data fullscreen=true />
								<div class="graph-overlay">
									<h1>"Political Landscape"</h1>
									<p class="subtitle">
										"Wahl-O-Mat Bayern 2013. Drag nodes to reposition. Click a party or thesis to re-weight it. Scroll to zoom."
									</p>
								</div>
							</div>
						}
					})
			}}
		</ErrorBoundary>
	}
}
