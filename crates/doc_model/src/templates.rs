//! Bundled starting content for new proposals

/// Section skeleton a new research proposal starts from
pub const DEFAULT_PROPOSAL_HTML: &str = r#"
<h2>1. Problem Statement &amp; Research Gap</h2>
<p>Coal supplies roughly 44% of India's energy mix, yet conventional utilization suffers from low conversion efficiency and high emissions. This proposal targets advanced gasification routes that raise efficiency while cutting environmental impact.</p>
<h2>2. Research Objectives</h2>
<p><strong>Primary Objectives:</strong></p>
<ul>
  <li>Develop gasification technology with 85%+ efficiency</li>
  <li>Reduce CO₂ emissions by 40% against conventional methods</li>
  <li>Integrate carbon capture and utilization</li>
</ul>
<p><strong>Secondary Objectives:</strong></p>
<ul>
  <li>Tune process parameters for Indian coal varieties</li>
  <li>Develop cost-effective catalyst systems</li>
  <li>Establish a pilot-scale demonstration facility</li>
</ul>
<h2>3. Justification &amp; Strategic Significance</h2>
<p>The work supports the 2070 net-zero commitment while preserving energy security, with applications in thermal power, steel and chemical production.</p>
<h2>4. Expected Outcomes &amp; Impact</h2>
<p><strong>Technical Outcomes:</strong></p>
<ul>
  <li>Gasification reactor design with improved efficiency</li>
  <li>Catalyst formulations for Indian coal types</li>
  <li>Carbon capture and utilization protocols</li>
  <li>Process optimization guidelines</li>
</ul>
<p><strong>Societal Impact:</strong> Cleaner air, clean-technology jobs, stronger energy security and progress on climate goals.</p>
<h2>5. Research Methodology</h2>
<p>The methodology covers:</p>
<ol>
  <li><strong>Coal Characterization:</strong> XRF, XRD, FTIR and thermogravimetric analysis</li>
  <li><strong>Reactor Design:</strong> CFD modelling with experimental validation</li>
  <li><strong>Catalyst Development:</strong> synthesis and characterization of new catalysts</li>
  <li><strong>Process Optimization:</strong> response surface methods and machine learning</li>
  <li><strong>Pilot Testing:</strong> scale-up studies and continuous operation trials</li>
</ol>
<h2>6. Work Plan &amp; Implementation Strategy</h2>
<p><strong>Phase 1 (Months 1-12):</strong> literature review, coal characterization, preliminary reactor design</p>
<p><strong>Phase 2 (Months 13-24):</strong> catalyst development, lab-scale testing, process optimization</p>
<p><strong>Phase 3 (Months 25-36):</strong> pilot demonstration, validation, commercialization roadmap</p>
<h2>7. Budget Breakdown</h2>
<p>Add a budget table covering personnel, equipment, materials, travel and overheads.</p>
<h2>8. Project Timeline &amp; Milestones</h2>
<p>Quarterly milestones, deliverables and key performance indicators, with risks and mitigations for each phase.</p>
"#;
