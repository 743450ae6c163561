// Page templates. Placeholders in braces are substituted by `page.rs`.

pub const FORM_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Apply to tutor</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 40rem; margin: 2rem auto; padding: 0 1rem; }
  label { display: block; margin-top: 1rem; font-weight: 600; }
  input, select, textarea { width: 100%; padding: .4rem; margin-top: .25rem; }
  #banner { display: none; background: #fde8e8; border: 1px solid #e02424; padding: .75rem; }
  #banner button { float: right; width: auto; }
  #dropzone { border: 2px dashed #999; padding: 1.5rem; text-align: center; margin-top: .5rem; }
  #dropzone.dragging { border-color: #1c64f2; background: #ebf5ff; }
  #file-error { color: #e02424; }
</style>
</head>
<body>
<h1>Apply to tutor</h1>
<div id="banner" role="alert"><button type="button" id="dismiss">&times;</button><span id="banner-text"></span></div>
<form id="application" enctype="multipart/form-data" novalidate>
  <label>First name * <input name="first_name"></label>
  <label>Last name * <input name="last_name"></label>
  <label>Email * <input name="email" type="email"></label>
  <label>Are you over 18? * {yes_no:over_18}</label>
  <label>Do you have the right to work in the UK? * {yes_no:right_to_work}</label>
  <label>Do you have any unspent criminal convictions? * {yes_no:criminal_convictions}</label>
  <label>Are you happy to complete a DBS check? * {yes_no:dbs_check}</label>
  <label>Do you have any accessibility needs? <textarea name="accessibility_needs" rows="2"></textarea></label>
  <label>Hours per week * <select name="hours_per_week"><option value="">Choose…</option>{hours_options}</select></label>
  <label>Do you have access to a computer? * {yes_no:has_computer}</label>
  <label>English * <select name="english_level"><option value="">Choose…</option>{english_options}</select></label>
  <label>Other languages <input name="other_languages"></label>
  <label>Tell us about yourself * <textarea name="about_you" rows="5"></textarea></label>
  <label>CV (PDF, DOC or DOCX, up to {max_upload_mb}MB)</label>
  <input type="hidden" name="resume_source" value="picker">
  <div id="dropzone">Drag your CV here or <input type="file" name="resume" accept=".pdf,.doc,.docx"></div>
  <p id="file-error"></p>
  <p><button type="submit" id="submit">Submit application</button></p>
</form>
<script>
(() => {
  const form = document.getElementById("application");
  const banner = document.getElementById("banner");
  const bannerText = document.getElementById("banner-text");
  const button = document.getElementById("submit");
  const zone = document.getElementById("dropzone");
  const picker = form.elements["resume"];
  const source = form.elements["resume_source"];
  let submitting = false;

  const showError = (message) => { bannerText.textContent = message; banner.style.display = "block"; };
  document.getElementById("dismiss").onclick = () => { banner.style.display = "none"; };

  zone.addEventListener("dragover", (e) => { e.preventDefault(); zone.classList.add("dragging"); });
  zone.addEventListener("dragleave", () => zone.classList.remove("dragging"));
  const fileError = document.getElementById("file-error");
  const MAX_UPLOAD_BYTES = {max_upload_bytes};
  const ALLOWED_EXTENSIONS = {allowed_extensions};

  // Same rules as the server: size first, then the text after the last dot.
  const checkFile = (file) => {
    if (file.size > MAX_UPLOAD_BYTES) return "{file_too_large_message}";
    const dot = file.name.lastIndexOf(".");
    const ext = dot >= 0 ? file.name.slice(dot + 1).toLowerCase() : "";
    return ALLOWED_EXTENSIONS.includes(ext) ? null : "{unsupported_type_message}";
  };

  const selectFile = (files, how) => {
    const file = files[0];
    const error = checkFile(file);
    if (error) {
      fileError.textContent = error;
      picker.value = "";
      source.value = "picker";
      return;
    }
    fileError.textContent = "";
    if (how === "drop") { picker.files = files; }
    source.value = how;
  };

  zone.addEventListener("drop", (e) => {
    e.preventDefault();
    zone.classList.remove("dragging");
    if (e.dataTransfer.files.length) { selectFile(e.dataTransfer.files, "drop"); }
  });

  picker.addEventListener("change", () => {
    if (picker.files.length) { selectFile(picker.files, "picker"); } else { fileError.textContent = ""; }
  });

  form.addEventListener("submit", async (e) => {
    e.preventDefault();
    if (submitting) return;
    submitting = true;
    button.disabled = true;
    banner.style.display = "none";
    try {
      const res = await fetch("/api/v1/applications", { method: "POST", body: new FormData(form) });
      const body = await res.json().catch(() => ({}));
      if (!res.ok) throw new Error((body.error && body.error.message) || "Something went wrong. Please try again.");
      window.location.href = body.redirect_url;
    } catch (err) {
      showError(err instanceof TypeError ? "{connectivity_message}" : err.message);
    } finally {
      submitting = false;
      button.disabled = false;
    }
  });
})();
</script>
</body>
</html>
"#;

pub const CONFIRMATION_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Application submitted</title>
</head>
<body style="font-family: system-ui, sans-serif; max-width: 40rem; margin: 2rem auto; padding: 0 1rem;">
<h1>Thank you for applying</h1>
<p>We have received your application{recipient}. We will be in touch soon.</p>
</body>
</html>
"#;
