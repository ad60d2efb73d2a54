//! Detail dialog shown when a leaf node is clicked.

use leptos::prelude::*;
use web_sys::MouseEvent;

use super::ring;
use super::theme::ProgressColor;
use super::types::NodeDetail;

/// Modal overlay describing one node. Renders nothing while `detail` is
/// `None`; clicking the backdrop or the close button clears it.
#[component]
pub fn NodeDetailDialog(
	#[prop(into)] detail: Signal<Option<NodeDetail>>,
	on_close: WriteSignal<Option<NodeDetail>>,
) -> impl IntoView {
	move || {
		detail.get().map(|d| {
			let percent = ring::percent_label(d.value);
			let percent_style = format!(
				"color: {}; font-weight: bold;",
				ProgressColor::for_value(d.value).color().to_css()
			);
			view! {
				<div class="tree-dialog-backdrop" on:click=move |_| on_close.set(None)>
					<div
						class="tree-dialog"
						role="dialog"
						aria-modal="true"
						on:click=|ev: MouseEvent| ev.stop_propagation()
					>
						<h2>{d.name}</h2>
						<dl>
							<dt>"Progress"</dt>
							<dd style=percent_style>{percent}</dd>
							<dt>"Depth"</dt>
							<dd>{d.depth}</dd>
						</dl>
						<button on:click=move |_| on_close.set(None)>"Close"</button>
					</div>
				</div>
			}
		})
	}
}
