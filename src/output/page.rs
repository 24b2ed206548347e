use crate::render::markup::escape_html;

pub const INPUT_ELEMENT_ID: &str = "orderId";
pub const RESULT_ELEMENT_ID: &str = "result";

/// The host document: an order ID input and the result container holding
/// `markup` verbatim.
pub fn render_page(order_id: &str, markup: &str) -> String {
    let order_id = escape_html(order_id);
    format!(
        r####"<!DOCTYPE html>
<html lang="ru">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>Просмотр заказа</title>
  <style>
    body {{
      font-family: Arial, sans-serif;
      margin: 2rem;
      color: #1e293b;
    }}
    .lookup {{
      display: flex;
      gap: 0.5rem;
      margin-bottom: 1.5rem;
    }}
    .lookup input {{
      padding: 6px 10px;
      border: 1px solid #cbd5e1;
      border-radius: 4px;
      min-width: 320px;
    }}
    #{result_id} td {{
      vertical-align: top;
      padding: 2px 6px;
    }}
  </style>
</head>
<body>
  <form class="lookup" method="get">
    <label for="{input_id}">ID заказа</label>
    <input type="text" id="{input_id}" name="{input_id}" value="{order_id}"/>
  </form>
  <div id="{result_id}">
{markup}
  </div>
</body>
</html>
"####,
        input_id = INPUT_ELEMENT_ID,
        result_id = RESULT_ELEMENT_ID,
    )
}
